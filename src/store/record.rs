use crate::error::BankError;

/// Width of the holder name field in bytes, including the NUL terminator.
pub const NAME_FIELD: usize = 100;
/// Width of the password field in bytes, including the NUL terminator.
pub const PASSWORD_FIELD: usize = 50;
/// Total size of one serialized account record.
pub const RECORD_SIZE: usize = 4 + NAME_FIELD + PASSWORD_FIELD + 4;

/// One account record as stored in the flat file.
///
/// The on-disk layout is fixed: a little-endian `i32` account number,
/// a NUL-padded name field, a NUL-padded password field, and a
/// little-endian `f32` balance. Records are concatenated with no
/// header, no padding between records, and no checksum.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub number: i32,
    pub name: String,
    pub password: String,
    pub balance: f32,
}

impl Account {
    /// Build a record after validating the field constraints.
    ///
    /// Names and passwords must fit their fixed-width fields with room
    /// for the terminator and must not contain NUL bytes, since NUL
    /// marks the end of the text on disk.
    pub fn new(number: i32, name: &str, password: &str, balance: f32) -> Result<Self, BankError> {
        if balance < 0.0 {
            return Err(BankError::InvalidInput(
                "initial balance must not be negative".to_string(),
            ));
        }
        validate_text("name", name, NAME_FIELD)?;
        validate_text("password", password, PASSWORD_FIELD)?;

        Ok(Self {
            number,
            name: name.to_string(),
            password: password.to_string(),
            balance,
        })
    }

    /// Serialize the record into its fixed on-disk layout.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.number.to_le_bytes());
        write_text_field(&mut buf[4..4 + NAME_FIELD], &self.name);
        write_text_field(
            &mut buf[4 + NAME_FIELD..4 + NAME_FIELD + PASSWORD_FIELD],
            &self.password,
        );
        buf[RECORD_SIZE - 4..].copy_from_slice(&self.balance.to_le_bytes());
        buf
    }

    /// Deserialize a record from its fixed on-disk layout.
    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        let number = i32::from_le_bytes(buf[0..4].try_into().expect("slice is exactly 4 bytes"));
        let name = read_text_field(&buf[4..4 + NAME_FIELD]);
        let password = read_text_field(&buf[4 + NAME_FIELD..4 + NAME_FIELD + PASSWORD_FIELD]);
        let balance = f32::from_le_bytes(
            buf[RECORD_SIZE - 4..]
                .try_into()
                .expect("slice is exactly 4 bytes"),
        );
        Self {
            number,
            name,
            password,
            balance,
        }
    }
}

fn validate_text(field: &str, value: &str, width: usize) -> Result<(), BankError> {
    if value.len() >= width {
        return Err(BankError::InvalidInput(format!(
            "{} exceeds {} byte limit: {} bytes",
            field,
            width - 1,
            value.len()
        )));
    }
    if value.contains('\0') {
        return Err(BankError::InvalidInput(format!(
            "{} must not contain NUL bytes",
            field
        )));
    }
    Ok(())
}

fn write_text_field(field: &mut [u8], value: &str) {
    // Field width is validated at construction, so the text plus its
    // terminator always fits. The remainder stays zeroed.
    field[..value.len()].copy_from_slice(value.as_bytes());
}

fn read_text_field(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
