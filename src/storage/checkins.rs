//! Check-in log: append and load completed check-ins.

use jiff::Timestamp;
use tracing::info;
use uuid::Uuid;

use crate::model::{CheckIn, Submission};
use crate::store::KvStore;

use super::{CHECK_INS_KEY, Recovered, Result, Storage};

impl<S: KvStore> Storage<S> {
    /// Seals a submission and appends it to the check-in log.
    ///
    /// Fails without writing if the stored log can't be read, so a corrupt
    /// log is never silently replaced.
    pub fn append_check_in(&self, submission: Submission) -> Result<CheckIn> {
        let mut log: Vec<CheckIn> = self.load_log(CHECK_INS_KEY)?;
        let check_in = CheckIn::seal(submission, Uuid::new_v4(), Timestamp::now());
        log.push(check_in.clone());
        self.save_log(CHECK_INS_KEY, &log)?;
        info!(id = %check_in.id, total = log.len(), "check-in recorded");
        Ok(check_in)
    }

    /// Loads all check-ins, oldest first.
    pub fn load_check_ins(&self) -> Result<Vec<CheckIn>> {
        self.load_log(CHECK_INS_KEY)
    }

    /// Loads all check-ins, substituting an empty log if the stored one is unreadable.
    pub fn load_check_ins_or_empty(&self) -> Recovered<CheckIn> {
        self.load_log_or_empty(CHECK_INS_KEY)
    }
}
