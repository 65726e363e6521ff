use mongodb::error::{Error, ErrorKind, WriteFailure};

const DUPLICATE_KEY: i32 = 11000;

/// Unique index violation (E11000).
pub fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// Name of the violated unique field, taken from the server message
/// (`... index: email_unique dup key: { email: "a@b.c" }`).
pub fn duplicate_key_field(err: &Error) -> Option<String> {
    let ErrorKind::Write(WriteFailure::WriteError(e)) = err.kind.as_ref() else {
        return None;
    };
    if e.code != DUPLICATE_KEY {
        return None;
    }
    let rest = e.message.split("dup key: {").nth(1)?;
    let field = rest.split(':').next()?.trim();
    (!field.is_empty()).then(|| field.to_string())
}
