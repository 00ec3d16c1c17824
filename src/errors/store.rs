use thiserror::Error;

/// Failure of a backing store, tagged with the operation that was running.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{op} redis error: {source}")]
    Redis {
        op: &'static str,
        #[source]
        source: redis::RedisError,
    },

    #[error("{op} postgres error: {source}")]
    Postgres {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op} decode error: {source}")]
    Decode {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{op} memory store error: lock poisoned")]
    Poisoned { op: &'static str },
}

impl StoreError {
    pub fn redis(op: &'static str) -> impl FnOnce(redis::RedisError) -> Self {
        move |source| StoreError::Redis { op, source }
    }

    pub fn postgres(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| StoreError::Postgres { op, source }
    }

    pub fn decode(op: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| StoreError::Decode { op, source }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_operation() {
        let source = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = StoreError::decode("get user")(source);
        assert!(err.to_string().starts_with("get user decode error"));

        let err = StoreError::Poisoned { op: "insert task" };
        assert_eq!(err.to_string(), "insert task memory store error: lock poisoned");
    }
}
