use crate::model::{constants::FEEDBACK_COOLDOWN_SECS, structures::map_record::MapRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq)]
pub enum FeedbackError {
    #[error("Feedback was sent recently, wait {remaining_secs}s before sending again")]
    CoolingDown { remaining_secs: i64 }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FeedbackKind {
    Like,
    Dislike,
    /// Problem report for a map. Not subject to the cooldown.
    Report
}

/// Feedback ready to be handed to an external sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    pub map_name: String,
    pub mapper: String,
    pub kind: FeedbackKind,
    pub submitted_at: DateTime<Utc>
}

impl FeedbackEvent {
    /// "{map} — {mapper}", as used to prefill report forms
    pub fn map_label(&self) -> String {
        format!("{} — {}", self.map_name, self.mapper)
    }
}

/// Allows one like/dislike per cooldown window. Time is supplied by the caller.
pub struct FeedbackLimiter {
    cooldown: Duration,
    last_sent: Option<DateTime<Utc>>
}

impl Default for FeedbackLimiter {
    fn default() -> Self {
        FeedbackLimiter::new(Duration::seconds(FEEDBACK_COOLDOWN_SECS))
    }
}

impl FeedbackLimiter {
    pub fn new(cooldown: Duration) -> Self {
        FeedbackLimiter {
            cooldown,
            last_sent: None
        }
    }

    /// Time left before another like/dislike is accepted
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.last_sent {
            Some(last) => (last + self.cooldown - now).max(Duration::zero()),
            None => Duration::zero()
        }
    }

    pub fn try_submit(
        &mut self,
        kind: FeedbackKind,
        map: &MapRecord,
        now: DateTime<Utc>
    ) -> Result<FeedbackEvent, FeedbackError> {
        if kind != FeedbackKind::Report {
            let remaining = self.remaining(now);
            if remaining > Duration::zero() {
                debug!(%kind, remaining_secs = remaining.num_seconds(), "Feedback rejected, cooling down");
                return Err(FeedbackError::CoolingDown {
                    remaining_secs: remaining.num_seconds()
                });
            }

            self.last_sent = Some(now);
        }

        info!(%kind, map = %map.name, mapper = %map.mapper, "Feedback accepted");

        Ok(FeedbackEvent {
            map_name: map.name.clone(),
            mapper: map.mapper.clone(),
            kind,
            submitted_at: now
        })
    }
}
