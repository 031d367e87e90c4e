use serde::de::DeserializeOwned;

use crate::error::Error;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, Error> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(with_path)
}

fn with_path(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let path = err.path().to_string();
    Error::Options { path, message: err.into_inner().to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Outer { inner: Inner }

    #[derive(Debug, Deserialize)]
    struct Inner { flag: bool }

    #[test]
    fn error_carries_the_path() {
        let err = from_str_with_path::<Outer>(r#"{"inner":{"flag":"yes"}}"#).unwrap_err();
        match err {
            Error::Options { path, message } => {
                assert_eq!(path, "inner.flag");
                assert!(message.contains("expected a boolean"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
