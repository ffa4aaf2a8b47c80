//! iRODS status codes.
//!
//! The server reports failures as negative integers. The last three digits
//! carry an optional errno, so `-130002` is `SYS_INVALID_INPUT_PARAM` with
//! errno 2. [`base_code`] strips that part before lookups.

pub const SYS_INVALID_INPUT_PARAM: i32 = -130_000;
pub const SYS_INVALID_ZONE_NAME: i32 = -358_000;
pub const OBJ_PATH_DOES_NOT_EXIST: i32 = -310_000;
pub const CAT_NO_ROWS_FOUND: i32 = -808_000;
pub const CAT_NAME_EXISTS_AS_COLLECTION: i32 = -809_000;
pub const CAT_NAME_EXISTS_AS_DATAOBJ: i32 = -812_000;
pub const CAT_UNKNOWN_COLLECTION: i32 = -814_000;
pub const CAT_NO_ACCESS_PERMISSION: i32 = -818_000;
pub const CAT_COLLECTION_NOT_EMPTY: i32 = -821_000;
pub const CAT_INVALID_AUTHENTICATION: i32 = -826_000;
pub const SYS_LIBRARY_ERROR: i32 = -1_110_000;

const NAMES: &[(i32, &str)] = &[
    (SYS_INVALID_INPUT_PARAM, "SYS_INVALID_INPUT_PARAM"),
    (SYS_INVALID_ZONE_NAME, "SYS_INVALID_ZONE_NAME"),
    (OBJ_PATH_DOES_NOT_EXIST, "OBJ_PATH_DOES_NOT_EXIST"),
    (CAT_NO_ROWS_FOUND, "CAT_NO_ROWS_FOUND"),
    (CAT_NAME_EXISTS_AS_COLLECTION, "CAT_NAME_EXISTS_AS_COLLECTION"),
    (CAT_NAME_EXISTS_AS_DATAOBJ, "CAT_NAME_EXISTS_AS_DATAOBJ"),
    (CAT_UNKNOWN_COLLECTION, "CAT_UNKNOWN_COLLECTION"),
    (CAT_NO_ACCESS_PERMISSION, "CAT_NO_ACCESS_PERMISSION"),
    (CAT_COLLECTION_NOT_EMPTY, "CAT_COLLECTION_NOT_EMPTY"),
    (CAT_INVALID_AUTHENTICATION, "CAT_INVALID_AUTHENTICATION"),
    (SYS_LIBRARY_ERROR, "SYS_LIBRARY_ERROR"),
];

/// Strip the errno component from a status code.
pub fn base_code(code: i32) -> i32 {
    (code / 1000) * 1000
}

/// Symbolic name for a status code, if known.
pub fn name(code: i32) -> Option<&'static str> {
    let base = base_code(code);
    NAMES
        .iter()
        .find(|(value, _)| *value == base)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_code_strips_errno() {
        assert_eq!(base_code(-130_002), SYS_INVALID_INPUT_PARAM);
        assert_eq!(base_code(-821_000), CAT_COLLECTION_NOT_EMPTY);
        assert_eq!(base_code(0), 0);
    }

    #[test]
    fn names_known_codes() {
        assert_eq!(name(-130_000), Some("SYS_INVALID_INPUT_PARAM"));
        assert_eq!(name(-358_013), Some("SYS_INVALID_ZONE_NAME"));
        assert_eq!(name(SYS_LIBRARY_ERROR), Some("SYS_LIBRARY_ERROR"));
    }

    #[test]
    fn unknown_code_has_no_name() {
        assert_eq!(name(-999_000), None);
    }
}
