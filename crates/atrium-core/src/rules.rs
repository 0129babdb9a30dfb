//! Sequential business-rule execution.

use crate::{AtriumResult, BoxFuture};

/// Runs business rules in order, stopping at the first failure.
///
/// Rules are async checks that return an error (typically
/// [`AtriumError::BusinessRule`](crate::AtriumError::BusinessRule)) when the
/// rule is violated.
pub async fn run<'a, I>(rules: I) -> AtriumResult<()>
where
    I: IntoIterator<Item = BoxFuture<'a, ()>>,
{
    for rule in rules {
        rule.await?;
    }
    Ok(())
}
