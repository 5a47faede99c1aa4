//! `remove` blocks: deleted outright.

use crate::error::TransformError;
use crate::options::Options;
use crate::traits::{BlockTransform, TransformContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveTransform;

impl BlockTransform for RemoveTransform {
    fn kind(&self) -> &str {
        "remove"
    }

    fn transform(
        &self,
        _options: &Options,
        _ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        Ok(String::new())
    }
}
