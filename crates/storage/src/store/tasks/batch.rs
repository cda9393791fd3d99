#![forbid(unsafe_code)]

use super::super::*;

impl BoardStore {
    /// Best-effort bulk create: each entry goes through `add_task` on its
    /// own, so one bad entry never blocks the rest. Entries without a
    /// column take `default_column`; failures come back by name with the
    /// error rendered as text.
    pub fn batch_add_tasks(
        &self,
        requests: Vec<TaskCreateRequest>,
        default_column: Option<&str>,
    ) -> Result<BatchAddReport, StoreError> {
        // surface a missing board once, up front, instead of once per entry
        self.load_board()?;

        let mut report = BatchAddReport::default();
        for mut request in requests {
            if request.column.is_none() {
                request.column = default_column.map(str::to_string);
            }
            let name = request.name.clone();
            match self.add_task(request) {
                Ok(created) => report.created.push(created),
                Err(error) => report.failed.push(BatchAddFailure {
                    name,
                    error: error.to_string(),
                }),
            }
        }
        Ok(report)
    }
}
