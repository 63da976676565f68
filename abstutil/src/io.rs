use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Pretty-prints anything serializable. Serializing plain data structures can't fail, so this
/// doesn't return a Result.
pub fn to_json<T: Serialize>(obj: &T) -> String {
    serde_json::to_string_pretty(obj).unwrap_or_else(|err| format!("\"{}\"", err))
}

pub fn slurp_file<I: AsRef<str>>(path: I) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs_err::read(path).with_context(|| format!("reading {}", path))
}

pub fn read_json<T: DeserializeOwned, I: AsRef<str>>(path: I) -> Result<T> {
    let path = path.as_ref();
    let bytes = slurp_file(path)?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {} as JSON", path))
}
