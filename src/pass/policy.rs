//! Input limits enforced before a password is generated.

use super::charset::Requirements;
use crate::error::InputError;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 128;
pub const MAX_PASSWORDS: usize = 100_000;

pub fn validate(length: usize, reqs: &Requirements) -> Result<(), InputError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(InputError::LengthOutOfRange {
            length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        });
    }
    if !reqs.any_permitted() {
        return Err(InputError::NothingPermitted);
    }
    let required = reqs.total_mandatory();
    if required > length {
        return Err(InputError::TooManyRequired { required, length });
    }
    Ok(())
}

pub fn validate_count(count: usize) -> Result<(), InputError> {
    if !(1..=MAX_PASSWORDS).contains(&count) {
        return Err(InputError::CountOutOfRange {
            count,
            max: MAX_PASSWORDS,
        });
    }
    Ok(())
}
