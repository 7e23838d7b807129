use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    day::{self, Clock, DayKey, LocalClock},
    persist::{KvStore, PersistError},
    types::{DayOffset, PlantedToken},
};

/// Failures raised by [`DayStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying medium failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// A stored garden sequence could not be decoded.
    #[error("malformed data under {key}: {source}")]
    Malformed {
        /// Storage key holding the bad value.
        key: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The offset lands outside the representable calendar.
    #[error("day offset {0} is out of range")]
    OffsetOutOfRange(DayOffset),
    /// Token coordinates must be finite.
    #[error("token coordinates ({x}, {y}) are not finite")]
    InvalidToken {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// What to do with a garden value that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Log a warning and treat the day as having no tokens.
    #[default]
    Coerce,
    /// Return [`StoreError::Malformed`].
    Fail,
}

/// Journal text and ordered tokens of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// Day the record belongs to.
    pub key: DayKey,
    /// Journal text, empty when never written.
    pub journal: String,
    /// Tokens in planting order.
    pub plants: Vec<PlantedToken>,
}

/// Maps calendar days to their journal text and planted tokens.
///
/// Absent data is never an error: unseen days read back as an empty journal
/// and an empty garden.
#[derive(Debug)]
pub struct DayStore<K, C = LocalClock> {
    kv: K,
    clock: C,
    policy: CorruptPolicy,
}

impl<K: KvStore, C: Clock> DayStore<K, C> {
    /// Creates a store over `kv` that resolves offsets against `clock`.
    pub fn new(kv: K, clock: C) -> Self {
        Self {
            kv,
            clock,
            policy: CorruptPolicy::default(),
        }
    }

    /// Replaces the corrupt-data policy.
    pub fn with_policy(mut self, policy: CorruptPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active corrupt-data policy.
    pub fn policy(&self) -> CorruptPolicy {
        self.policy
    }

    /// Underlying medium.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Mutable access to the underlying medium.
    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    /// Today's date according to the store's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Key of the day `offset` days from today. Time of day never matters.
    pub fn key_for(&self, offset: DayOffset) -> StoreResult<DayKey> {
        DayKey::from_offset(self.clock.today(), offset).ok_or(StoreError::OffsetOutOfRange(offset))
    }

    /// Display label of the day at `offset`.
    pub fn label_for(&self, offset: DayOffset) -> StoreResult<String> {
        let key = self.key_for(offset)?;
        Ok(day::label(&key, offset))
    }

    /// Journal text of `key`, or `""` when never written.
    pub fn load_journal(&self, key: &DayKey) -> StoreResult<String> {
        Ok(self.kv.get(&key.journal_key())?.unwrap_or_default())
    }

    /// Overwrites the journal text of `key`.
    pub fn save_journal(&mut self, key: &DayKey, text: &str) -> StoreResult<()> {
        self.kv.set(&key.journal_key(), text)?;
        debug!(day = %key, len = text.len(), "journal saved");
        Ok(())
    }

    /// Tokens of `key` in planting order, or `[]` when none were planted.
    pub fn load_plants(&self, key: &DayKey) -> StoreResult<Vec<PlantedToken>> {
        let storage_key = key.garden_key();
        let raw = self.kv.get(&storage_key)?;
        decode_plants(self.policy, &storage_key, raw)
    }

    /// Appends `token` to the end of the day's sequence and persists the
    /// whole sequence in one read-modify-write.
    pub fn append_plant(&mut self, key: &DayKey, token: PlantedToken) -> StoreResult<()> {
        if !token.x.is_finite() || !token.y.is_finite() {
            return Err(StoreError::InvalidToken {
                x: token.x,
                y: token.y,
            });
        }

        let storage_key = key.garden_key();
        let policy = self.policy;
        let mut failure: Option<StoreError> = None;

        self.kv.update(&storage_key, &mut |current| {
            let mut plants = match decode_plants(policy, &storage_key, current) {
                Ok(plants) => plants,
                Err(err) => {
                    failure = Some(err);
                    return None;
                }
            };
            plants.push(token);
            match serde_json::to_string(&plants) {
                Ok(encoded) => Some(encoded),
                Err(err) => {
                    failure = Some(PersistError::from(err).into());
                    None
                }
            }
        })?;

        if let Some(err) = failure {
            return Err(err);
        }
        debug!(day = %key, mood = %token.mood, x = token.x, y = token.y, "token planted");
        Ok(())
    }

    /// Pops the most recently planted token. Returns `None` without writing
    /// when the day has no tokens.
    pub fn remove_last_plant(&mut self, key: &DayKey) -> StoreResult<Option<PlantedToken>> {
        let storage_key = key.garden_key();
        let policy = self.policy;
        let mut failure: Option<StoreError> = None;
        let mut popped: Option<PlantedToken> = None;

        self.kv.update(&storage_key, &mut |current| {
            let mut plants = match decode_plants(policy, &storage_key, current) {
                Ok(plants) => plants,
                Err(err) => {
                    failure = Some(err);
                    return None;
                }
            };
            let last = plants.pop()?;
            match serde_json::to_string(&plants) {
                Ok(encoded) => {
                    popped = Some(last);
                    Some(encoded)
                }
                Err(err) => {
                    failure = Some(PersistError::from(err).into());
                    None
                }
            }
        })?;

        if let Some(err) = failure {
            return Err(err);
        }
        if let Some(token) = &popped {
            debug!(day = %key, mood = %token.mood, "token removed");
        }
        Ok(popped)
    }

    /// Journal and tokens of `key` together.
    pub fn load_record(&self, key: &DayKey) -> StoreResult<DayRecord> {
        Ok(DayRecord {
            key: *key,
            journal: self.load_journal(key)?,
            plants: self.load_plants(key)?,
        })
    }
}

fn decode_plants(
    policy: CorruptPolicy,
    storage_key: &str,
    raw: Option<String>,
) -> StoreResult<Vec<PlantedToken>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<PlantedToken>>(&raw) {
        Ok(plants) => Ok(plants),
        Err(source) => match policy {
            CorruptPolicy::Coerce => {
                warn!(key = storage_key, error = %source, "discarding malformed garden data");
                Ok(Vec::new())
            }
            CorruptPolicy::Fail => Err(StoreError::Malformed {
                key: storage_key.to_string(),
                source,
            }),
        },
    }
}
