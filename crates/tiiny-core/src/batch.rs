// ── Batch processing ──
//
// Items run strictly one after another. A failure either stops the batch
// (annotated with the item index) or becomes an `{"error": ...}` output in
// the failed item's slot.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{CoreError, ItemError};
use crate::item::Item;
use crate::publisher::Publisher;

/// What to do when an item fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Record the failure as an error output and keep going.
    Continue,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Operation for items that don't name their own.
    pub operation: Option<String>,
    pub on_failure: FailureMode,
}

/// One output per input item, paired back by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: Value,
    pub paired_item: usize,
}

impl OutputItem {
    /// Whether this is a `{"error": ...}` placeholder for a failed item.
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .is_some_and(|m| m.len() == 1 && m.get("error").is_some_and(Value::is_string))
    }
}

impl Publisher {
    /// Process one item. The item's own `operation` wins over `default_operation`.
    pub async fn execute_item(
        &self,
        index: usize,
        item: &Item,
        default_operation: Option<&str>,
    ) -> Result<OutputItem, ItemError> {
        let result = match item.params.operation.as_deref().or(default_operation) {
            Some(operation) => self.dispatch(operation, item).await,
            None => Err(CoreError::MissingParameter {
                name: "operation".into(),
            }),
        };

        result
            .map(|json| OutputItem {
                json,
                paired_item: index,
            })
            .map_err(|source| ItemError { index, source })
    }

    /// Process every item in order.
    pub async fn execute(
        &self,
        items: &[Item],
        options: &BatchOptions,
    ) -> Result<Vec<OutputItem>, ItemError> {
        self.execute_with(items, options, |_| {}).await
    }

    /// [`execute`](Self::execute), calling `on_output` after each item.
    pub async fn execute_with<F>(
        &self,
        items: &[Item],
        options: &BatchOptions,
        mut on_output: F,
    ) -> Result<Vec<OutputItem>, ItemError>
    where
        F: FnMut(&OutputItem),
    {
        let mut outputs = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let output = match self
                .execute_item(index, item, options.operation.as_deref())
                .await
            {
                Ok(output) => output,
                Err(err) if options.on_failure == FailureMode::Continue => {
                    warn!(index, error = %err.source, "item failed, continuing");
                    OutputItem {
                        json: json!({ "error": err.source.to_string() }),
                        paired_item: index,
                    }
                }
                Err(err) => return Err(err),
            };
            on_output(&output);
            outputs.push(output);
        }

        debug!(count = outputs.len(), "batch finished");
        Ok(outputs)
    }
}
