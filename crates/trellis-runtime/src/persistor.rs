//! Message-log persistence middleware.
//!
//! [`StatePersistor`] appends every accepted message to a length-framed log
//! and writes a full state checkpoint every [`CHECKPOINT_INTERVAL`] messages.
//! [`StatePersistor::restore_state`] rebuilds the state by starting from the
//! last checkpoint (or the given initial state) and replaying the messages
//! recorded after it.
//!
//! Persistence never fails a transition: write errors are logged and the
//! transition passes through untouched.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::middleware::{Middleware, Next, Transition};

/// Full state checkpoint cadence, in accepted messages.
const CHECKPOINT_INTERVAL: u32 = 20;

const KIND_CHECKPOINT: u8 = 0;
const KIND_MESSAGE: u8 = 1;

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    /// A record with an unknown kind byte; the log was not written by this
    /// format.
    UnknownRecordKind(u8),
    RecordTooLarge(usize),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(err) => write!(f, "persistence i/o failed: {err}"),
            PersistError::Encode(err) => write!(f, "failed to encode record: {err}"),
            PersistError::Decode(err) => write!(f, "failed to decode record: {err}"),
            PersistError::UnknownRecordKind(kind) => {
                write!(f, "unknown record kind {kind}")
            }
            PersistError::RecordTooLarge(len) => {
                write!(f, "record of {len} bytes exceeds the frame limit")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(err) => Some(err),
            PersistError::Encode(err) | PersistError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err)
    }
}

/// How states and messages become bytes in the log.
pub trait StateSerializer<S, M>: Send {
    fn serialize_state(&self, state: &S) -> Result<Vec<u8>, PersistError>;

    fn deserialize_state(&self, bytes: &[u8]) -> Result<S, PersistError>;

    fn serialize_message(&self, message: &M) -> Result<Vec<u8>, PersistError>;

    fn deserialize_message(&self, bytes: &[u8]) -> Result<M, PersistError>;
}

/// JSON framing via serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<S, M> StateSerializer<S, M> for JsonSerializer
where
    S: Serialize + DeserializeOwned,
    M: Serialize + DeserializeOwned,
{
    fn serialize_state(&self, state: &S) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(state).map_err(PersistError::Encode)
    }

    fn deserialize_state(&self, bytes: &[u8]) -> Result<S, PersistError> {
        serde_json::from_slice(bytes).map_err(PersistError::Decode)
    }

    fn serialize_message(&self, message: &M) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(message).map_err(PersistError::Encode)
    }

    fn deserialize_message(&self, bytes: &[u8]) -> Result<M, PersistError> {
        serde_json::from_slice(bytes).map_err(PersistError::Decode)
    }
}

struct LogFile {
    file: File,
    messages_since_checkpoint: u32,
}

/// Middleware that persists accepted messages so state survives restarts.
pub struct StatePersistor<SZ> {
    path: PathBuf,
    serializer: SZ,
    log: Mutex<LogFile>,
}

impl<SZ> StatePersistor<SZ> {
    /// Open (or create) the log at `path` for appending.
    pub fn open(path: impl Into<PathBuf>, serializer: SZ) -> Result<Self, PersistError> {
        let path = path.into();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)?;
        Ok(Self {
            path,
            serializer,
            log: Mutex::new(LogFile {
                file,
                messages_since_checkpoint: 0,
            }),
        })
    }

    /// Discard the log. The next restore starts from the initial state.
    pub fn clear(&self) -> Result<(), PersistError> {
        let mut log = self.log.lock().expect("persistor lock poisoned");
        log.file.set_len(0)?;
        log.messages_since_checkpoint = 0;
        Ok(())
    }

    /// Rebuild the state: last checkpoint (or `initial_state`) plus the
    /// replay of every message recorded after it. Messages the replay
    /// function rejects are skipped. A truncated trailing record, as left by
    /// a crash mid-write, ends the replay silently.
    pub fn restore_state<S, M>(
        &self,
        initial_state: S,
        replay: impl Fn(&S, M) -> Option<S>,
    ) -> Result<S, PersistError>
    where
        SZ: StateSerializer<S, M>,
    {
        let mut file = File::open(&self.path)?;
        let mut records = Vec::new();
        while let Some(record) = read_record(&mut file)? {
            records.push(record);
        }

        let checkpoint_index = records
            .iter()
            .rposition(|(kind, _)| *kind == KIND_CHECKPOINT);

        let mut state = match checkpoint_index {
            Some(index) => self.serializer.deserialize_state(&records[index].1)?,
            None => initial_state,
        };

        let tail_start = checkpoint_index.map_or(0, |index| index + 1);
        for (kind, payload) in &records[tail_start..] {
            if *kind != KIND_MESSAGE {
                return Err(PersistError::UnknownRecordKind(*kind));
            }
            let message = self.serializer.deserialize_message(payload)?;
            match replay(&state, message) {
                Some(next) => state = next,
                None => {
                    warn!(target: "trellis.persist", "recorded message rejected on replay");
                }
            }
        }
        Ok(state)
    }

    fn record<S, M>(&self, state: &S, message: &M) -> Result<(), PersistError>
    where
        SZ: StateSerializer<S, M>,
    {
        let payload = self.serializer.serialize_message(message)?;
        let mut log = self.log.lock().expect("persistor lock poisoned");
        append_record(&mut log.file, KIND_MESSAGE, &payload)?;
        log.messages_since_checkpoint += 1;

        if log.messages_since_checkpoint >= CHECKPOINT_INTERVAL {
            let snapshot = self.serializer.serialize_state(state)?;
            append_record(&mut log.file, KIND_CHECKPOINT, &snapshot)?;
            log.messages_since_checkpoint = 0;
        }
        Ok(())
    }
}

impl<S, M, C, SZ> Middleware<S, M, C> for StatePersistor<SZ>
where
    M: Clone,
    SZ: StateSerializer<S, M>,
{
    fn apply(
        &self,
        state: S,
        message: M,
        command: Option<C>,
        next: Next<'_, S, M, C>,
    ) -> Transition<S, C> {
        let recorded = message.clone();
        let transition = next(state, message, command);
        if let Some((next_state, _)) = &transition {
            if let Err(err) = self.record(next_state, &recorded) {
                warn!(target: "trellis.persist", error = %err, "message not persisted");
            }
        }
        transition
    }
}

fn append_record(file: &mut File, kind: u8, payload: &[u8]) -> Result<(), PersistError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| PersistError::RecordTooLarge(payload.len()))?;
    file.write_all(&[kind])?;
    file.write_all(&len.to_le_bytes())?;
    file.write_all(payload)?;
    file.flush()?;
    Ok(())
}

/// Read one `[kind][len u32 le][payload]` frame. `None` at a clean end of
/// file or a truncated tail.
fn read_record(file: &mut File) -> Result<Option<(u8, Vec<u8>)>, PersistError> {
    let mut kind = [0u8; 1];
    match file.read_exact(&mut kind) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err.into()),
    }

    let mut len = [0u8; 4];
    if read_fully(file, &mut len)?.is_none() {
        return Ok(None);
    }
    let mut payload = vec![0u8; u32::from_le_bytes(len) as usize];
    if read_fully(file, &mut payload)?.is_none() {
        return Ok(None);
    }
    Ok(Some((kind[0], payload)))
}

fn read_fully(file: &mut File, buf: &mut [u8]) -> Result<Option<()>, PersistError> {
    match file.read_exact(buf) {
        Ok(()) => Ok(Some(())),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::apply_chain;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum CounterMessage {
        Add(u32),
        Reset,
    }

    fn update(
        state: u32,
        message: CounterMessage,
        _: Option<()>,
    ) -> Transition<u32, ()> {
        match message {
            CounterMessage::Add(n) => Some((state + n, None)),
            CounterMessage::Reset => None,
        }
    }

    fn replay(state: &u32, message: CounterMessage) -> Option<u32> {
        update(*state, message, None).map(|(s, _)| s)
    }

    fn chain_with(persistor: StatePersistor<JsonSerializer>) -> Vec<Box<dyn Middleware<u32, CounterMessage, ()>>> {
        vec![Box::new(persistor)]
    }

    #[test]
    fn accepted_messages_replay_to_the_same_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.log");
        let chain = chain_with(StatePersistor::open(&path, JsonSerializer).unwrap());

        let mut state = 0u32;
        for n in [1, 2, 3] {
            let (next, _) =
                apply_chain(&chain, state, CounterMessage::Add(n), None, &update).unwrap();
            state = next;
        }
        assert_eq!(state, 6);

        let restored = StatePersistor::open(&path, JsonSerializer)
            .unwrap()
            .restore_state(0u32, replay)
            .unwrap();
        assert_eq!(restored, 6);
    }

    #[test]
    fn rejected_messages_are_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.log");
        let chain = chain_with(StatePersistor::open(&path, JsonSerializer).unwrap());

        assert!(apply_chain(&chain, 0, CounterMessage::Reset, None, &update).is_none());

        let restored = StatePersistor::open(&path, JsonSerializer)
            .unwrap()
            .restore_state(7u32, replay)
            .unwrap();
        assert_eq!(restored, 7, "an empty log must restore the initial state");
    }

    #[test]
    fn checkpoint_supersedes_the_initial_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.log");
        let chain = chain_with(StatePersistor::open(&path, JsonSerializer).unwrap());

        let mut state = 0u32;
        for _ in 0..CHECKPOINT_INTERVAL {
            let (next, _) =
                apply_chain(&chain, state, CounterMessage::Add(1), None, &update).unwrap();
            state = next;
        }

        // The log now ends in a checkpoint; restoring with a replay function
        // that panics proves no message is replayed past it.
        let restored = StatePersistor::open(&path, JsonSerializer)
            .unwrap()
            .restore_state(0u32, |_, _: CounterMessage| {
                panic!("no message should replay after a checkpoint")
            })
            .unwrap();
        assert_eq!(restored, u32::from(CHECKPOINT_INTERVAL));
    }

    #[test]
    fn truncated_tail_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.log");
        let chain = chain_with(StatePersistor::open(&path, JsonSerializer).unwrap());
        apply_chain(&chain, 0, CounterMessage::Add(5), None, &update).unwrap();

        // A crash mid-write leaves a partial frame.
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(&[KIND_MESSAGE, 0xFF]).unwrap();

        let restored = StatePersistor::open(&path, JsonSerializer)
            .unwrap()
            .restore_state(0u32, replay)
            .unwrap();
        assert_eq!(restored, 5);
    }

    #[test]
    fn clear_discards_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.log");
        let persistor = StatePersistor::open(&path, JsonSerializer).unwrap();
        let chain = chain_with(StatePersistor::open(&path, JsonSerializer).unwrap());
        apply_chain(&chain, 0, CounterMessage::Add(9), None, &update).unwrap();

        persistor.clear().unwrap();
        let restored = persistor.restore_state(1u32, replay).unwrap();
        assert_eq!(restored, 1);
    }
}
