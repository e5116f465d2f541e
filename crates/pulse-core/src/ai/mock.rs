//! Mock backend for testing
//!
//! Returns a canned, well-formed insight response so the extract pipeline can
//! be exercised without a running workflow deployment.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::{AnalysisRequest, InsightBackend};

const MOCK_RESPONSE: &str = r#"### Metrics
- **Engagement Rate:** 3.8%
- **Likes:** 1,250
- **Shares:** 98
- **Comments:** 212
- **Views:** 45,000
- **Primary Age Group:** 18-24, 25-34
- **Gender Split:** 55% female, 45% male

### Format Insights
- Video posts get the most engagement
- Static images underperform on weekends

### Predictions
- **Expected Likes:** 1,400
- **Expected Shares:** 110
- **Expected Comments:** 240
- **Expected Views:** 50,000

### Explanation
- Engagement tracks posting time more closely than content type.

### Suggestions
- **Optimal Posting Time:** 7-9 PM on weekdays
- **Hashtags:** #MockData #Testing
- **Content Quality:** Lean into short-form video
- **Target Audience:** Young adults
"#;

/// Mock insight backend for testing
///
/// Returns a predictable, well-formed response. Can be configured unhealthy
/// or failing for exercising degraded paths.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Whether run_analysis should fail
    pub fail: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            fail: false,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            fail: false,
        }
    }

    /// Create a mock backend whose analysis calls fail
    pub fn failing() -> Self {
        Self {
            healthy: true,
            fail: true,
        }
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    async fn run_analysis(&self, _request: &AnalysisRequest) -> Result<String> {
        if self.fail {
            return Err(Error::Backend("mock backend configured to fail".into()));
        }
        Ok(MOCK_RESPONSE.to_string())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
