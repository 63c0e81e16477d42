//! Sequential bulk validation with progress reporting.

use crate::batch::input::EmailTable;
use crate::core::error::Result;
use crate::core::models::BatchResult;
use crate::validation::deliverability::DeliverabilityCheck;
use crate::validation::disposable::DisposableCheck;
use crate::validation::validator::Validator;
use std::time::Instant;

/// Position within a running batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// `completed / total`, or `1.0` for an empty batch.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Receives a report after every processed row.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(Progress),
{
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Discards progress reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

/// Feeds addresses through a [`Validator`] one at a time, preserving order.
#[derive(Debug, Clone)]
pub struct BatchRunner<D, L> {
    validator: Validator<D, L>,
}

impl<D, L> BatchRunner<D, L>
where
    D: DisposableCheck,
    L: DeliverabilityCheck,
{
    pub fn new(validator: Validator<D, L>) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator<D, L> {
        &self.validator
    }

    /// Validates every address in order. One verdict per input, none dropped.
    pub async fn run<S, P>(&self, emails: &[S], sink: &mut P) -> BatchResult
    where
        S: AsRef<str>,
        P: ProgressSink + ?Sized,
    {
        let total = emails.len();
        let start_time = Instant::now();
        let mut result = BatchResult::with_capacity(total);

        tracing::info!(target: "batch", "Verifying {} addresses", total);
        for (index, email) in emails.iter().enumerate() {
            let verdict = self.validator.verify(email.as_ref()).await;
            tracing::debug!(
                target: "batch",
                "[{}/{}] {} -> deliverable={}",
                index + 1,
                total,
                verdict.email(),
                verdict.deliverable()
            );
            result.push(verdict);
            sink.report(Progress {
                completed: index + 1,
                total,
            });
        }

        tracing::info!(
            target: "batch",
            "Batch finished in {:.2?}: {}",
            start_time.elapsed(),
            result.summary()
        );
        result
    }

    /// Extracts `column` from `table` and runs it.
    ///
    /// A missing column fails before any row is validated.
    pub async fn run_table<P>(
        &self,
        table: &EmailTable,
        column: &str,
        sink: &mut P,
    ) -> Result<BatchResult>
    where
        P: ProgressSink + ?Sized,
    {
        let emails = table.column(column)?;
        Ok(self.run(&emails, sink).await)
    }
}
