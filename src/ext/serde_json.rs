// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Nested JSON fetching via dotted paths with typed, error-reporting extraction for serde_json::Value
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to / to_or_default / optional / required)
// invariants: No panics; missing paths yield None; `required` names the dotted path in its error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

/// Wrapper around a JSON location to allow typed extraction via a clear second step.
pub struct JsonFetched<'a> {
  path: String,
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Attempt to deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Deserialize as `T`, returning `T::default()` on failure.
  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// `None` when the path is missing or `null`; an error when present but not a `T`.
  pub fn optional<T>(&self) -> Result<Option<T>>
  where
    T: DeserializeOwned,
  {
    match self.inner {
      None | Some(serde_json::Value::Null) => Ok(None),
      Some(v) => serde_json::from_value::<T>(v.clone())
        .map(Some)
        .with_context(|| format!("malformed field `{}`", self.path)),
    }
  }

  /// Like `optional`, but a missing or `null` value is an error too.
  pub fn required<T>(&self) -> Result<T>
  where
    T: DeserializeOwned,
  {
    self
      .optional::<T>()?
      .ok_or_else(|| anyhow!("missing field `{}`", self.path))
  }
}

/// Extension to fetch nested values via dotted paths like "user.login".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched {
        path: String::new(),
        inner: Some(self),
      };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => {
          return JsonFetched {
            path: path.to_string(),
            inner: None,
          };
        }
      }
    }

    JsonFetched {
      path: path.to_string(),
      inner: Some(cur),
    }
  }
}
