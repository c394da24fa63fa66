// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use redis::{ErrorKind, RedisError};
use stowage_backend::{Error, ValueKind};

/// Redis reply code for a command applied to a key holding another type.
const WRONG_TYPE: &str = "WRONGTYPE";

/// Returns `true` if the error means the server cannot be used at all.
fn is_transport_failure(error: &RedisError) -> bool {
    error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
        || error.kind() == ErrorKind::AuthenticationFailed
}

/// Maps a failed command on `key` into the shared error taxonomy.
pub(crate) fn command_error(error: RedisError, key: &str, expected: ValueKind) -> Error {
    if is_transport_failure(&error) {
        Error::connection(error)
    } else if error.code() == Some(WRONG_TYPE) {
        Error::type_mismatch(key, expected)
    } else {
        Error::operation(error)
    }
}
