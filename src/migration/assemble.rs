//! Turns raw decoded parameters into client-facing account records.

use crate::migration::secret::encode_secret;
use crate::migration::types::{AccountRecord, Algorithm, OtpParameter, OtpType};

/// Period applied to every TOTP record; the export format carries none.
pub const DEFAULT_PERIOD: u32 = 30;

/// Build one [`AccountRecord`] from a decoded parameter.
///
/// Enum codes 0 and any unrecognised future code map to the defaults
/// (SHA-1, 6 digits, TOTP) rather than failing. Name and issuer are taken
/// verbatim from the binary message; entries with an empty secret are kept,
/// with an empty base-32 string.
pub fn assemble(param: &OtpParameter) -> AccountRecord {
    let otp_type = OtpType::from_code(param.otp_type);
    AccountRecord {
        issuer: param.issuer.clone(),
        account: param.name.clone(),
        secret: encode_secret(&param.secret),
        algorithm: Algorithm::from_code(param.algorithm),
        digits: digits_from_code(param.digits),
        otp_type,
        period: match otp_type {
            OtpType::Totp => Some(DEFAULT_PERIOD),
            OtpType::Hotp => None,
        },
        counter: match otp_type {
            OtpType::Hotp => Some(param.counter),
            OtpType::Totp => None,
        },
    }
}

/// Map the raw digit-count enum code (1 = six, 2 = eight) to a digit count.
fn digits_from_code(code: u64) -> u8 {
    if code == 2 {
        8
    } else {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param() -> OtpParameter {
        OtpParameter {
            secret: b"12345678901234567890".to_vec(),
            name: "alice@example.com".into(),
            issuer: "GitHub".into(),
            algorithm: 1,
            digits: 1,
            otp_type: 2,
            counter: 0,
        }
    }

    #[test]
    fn totp_record_has_period_but_no_counter() {
        let record = assemble(&param());
        assert_eq!(record.account, "alice@example.com");
        assert_eq!(record.issuer, "GitHub");
        assert_eq!(record.secret, "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
        assert_eq!(record.algorithm, Algorithm::Sha1);
        assert_eq!(record.digits, 6);
        assert_eq!(record.otp_type, OtpType::Totp);
        assert_eq!(record.period, Some(30));
        assert_eq!(record.counter, None);
    }

    #[test]
    fn hotp_record_has_counter_but_no_period() {
        let mut p = param();
        p.otp_type = 1;
        p.counter = 17;
        let record = assemble(&p);
        assert_eq!(record.otp_type, OtpType::Hotp);
        assert_eq!(record.counter, Some(17));
        assert_eq!(record.period, None);
    }

    #[test]
    fn unspecified_codes_map_to_defaults() {
        let p = OtpParameter::default();
        let record = assemble(&p);
        assert_eq!(record.algorithm, Algorithm::Sha1);
        assert_eq!(record.digits, 6);
        assert_eq!(record.otp_type, OtpType::Totp);
        assert_eq!(record.period, Some(30));
    }

    #[test]
    fn unknown_codes_degrade_gracefully() {
        let mut p = param();
        p.algorithm = 99;
        p.digits = 99;
        p.otp_type = 99;
        let record = assemble(&p);
        assert_eq!(record.algorithm, Algorithm::Sha1);
        assert_eq!(record.digits, 6);
        assert_eq!(record.otp_type, OtpType::Totp);
    }

    #[test]
    fn digit_codes() {
        let mut p = param();
        p.digits = 2;
        assert_eq!(assemble(&p).digits, 8);
        p.digits = 1;
        assert_eq!(assemble(&p).digits, 6);
        p.digits = 0;
        assert_eq!(assemble(&p).digits, 6);
    }

    #[test]
    fn empty_secret_entry_is_kept() {
        let mut p = param();
        p.secret.clear();
        let record = assemble(&p);
        assert_eq!(record.secret, "");
        assert_eq!(record.account, "alice@example.com");
    }

    #[test]
    fn md5_code_maps_to_md5() {
        let mut p = param();
        p.algorithm = 4;
        assert_eq!(assemble(&p).algorithm, Algorithm::Md5);
    }
}
