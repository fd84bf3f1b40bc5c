//! Input format rules for credential endpoints.
//!
//! The identifier mode selects the uid rule, the secret mode the passcode rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{IdentifierMode, SecretMode};
use crate::error::{AuthError, AuthResult};

const EMAIL_MIN_LEN: usize = 5;
const EMAIL_MAX_LEN: usize = 50;
const MOBILE_MIN_LEN: usize = 12;
const MOBILE_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 30;

/// Length of a one-time passcode.
pub const OTP_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// International calling-code prefix followed by up to 14 subscriber digits.
static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "^(",
        "011|999|998|997|996|995|994|993|992|991|990|979|978|977|976|975|974|973|972|971|",
        "970|969|968|967|966|965|964|963|962|961|960|899|898|897|896|895|894|893|892|891|",
        "890|889|888|887|886|885|884|883|882|881|880|879|878|877|876|875|874|873|872|871|",
        "870|859|858|857|856|855|854|853|852|851|850|839|838|837|836|835|834|833|832|831|",
        "830|809|808|807|806|805|804|803|802|801|800|699|698|697|696|695|694|693|692|691|",
        "690|689|688|687|686|685|684|683|682|681|680|679|678|677|676|675|674|673|672|671|",
        "670|599|598|597|596|595|594|593|592|591|590|509|508|507|506|505|504|503|502|501|",
        "500|429|428|427|426|425|424|423|422|421|420|389|388|387|386|385|384|383|382|381|",
        "380|379|378|377|376|375|374|373|372|371|370|359|358|357|356|355|354|353|352|351|",
        "350|299|298|297|296|295|294|293|292|291|290|289|288|287|286|285|284|283|282|281|",
        "280|269|268|267|266|265|264|263|262|261|260|259|258|257|256|255|254|253|252|251|",
        "250|249|248|247|246|245|244|243|242|241|240|239|238|237|236|235|234|233|232|231|",
        "230|229|228|227|226|225|224|223|222|221|220|219|218|217|216|215|214|213|212|211|",
        "210|98|95|94|93|92|91|90|86|84|82|81|66|65|64|63|62|61|60|58|57|56|55|54|53|52|",
        "51|49|48|47|46|45|44|43|41|40|39|36|34|33|32|31|30|27|20|7|1",
        ")[0-9]{0,14}$"
    ))
    .expect("mobile pattern is valid")
});

static OTP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("otp pattern is valid"));

/// Check `uid` against the format of the active identifier mode.
pub fn validate_uid(uid: &str, mode: IdentifierMode) -> AuthResult<()> {
    let len = uid.chars().count();
    let valid = match mode {
        IdentifierMode::Email => {
            (EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&len) && EMAIL_PATTERN.is_match(uid)
        }
        IdentifierMode::Mobile => {
            (MOBILE_MIN_LEN..=MOBILE_MAX_LEN).contains(&len) && MOBILE_PATTERN.is_match(uid)
        }
    };

    if valid {
        Ok(())
    } else {
        Err(AuthError::Validation(format!("Invalid {} provided.", mode)))
    }
}

/// Check `passcode` against the format of the active secret mode.
pub fn validate_passcode(passcode: &str, mode: SecretMode) -> AuthResult<()> {
    match mode {
        SecretMode::Otp if passcode.len() == OTP_LENGTH && OTP_PATTERN.is_match(passcode) => Ok(()),
        SecretMode::Otp => Err(AuthError::Validation(format!(
            "One-time passcode must be exactly {} digits.",
            OTP_LENGTH
        ))),
        SecretMode::Password => {
            let len = passcode.chars().count();
            if (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
                Ok(())
            } else {
                Err(AuthError::Validation(format!(
                    "Password must be between {} and {} characters.",
                    PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_uid() {
        assert!(validate_uid("test@mail.com", IdentifierMode::Email).is_ok());
        assert!(validate_uid("care@mail.com", IdentifierMode::Email).is_ok());
        assert!(validate_uid("a@b", IdentifierMode::Email).is_err());
        assert!(validate_uid("not-an-email", IdentifierMode::Email).is_err());
        assert!(validate_uid("has space@mail.com", IdentifierMode::Email).is_err());

        let long = format!("{}@mail.com", "x".repeat(45));
        assert!(validate_uid(&long, IdentifierMode::Email).is_err());
    }

    #[test]
    fn test_mobile_uid() {
        assert!(validate_uid("919876543210", IdentifierMode::Mobile).is_ok());
        assert!(validate_uid("180082565210", IdentifierMode::Mobile).is_ok());
        // Too short even though the prefix is known.
        assert!(validate_uid("18008256521", IdentifierMode::Mobile).is_err());
        // Unknown calling code.
        assert!(validate_uid("012345678901", IdentifierMode::Mobile).is_err());
        assert!(validate_uid("+919876543210", IdentifierMode::Mobile).is_err());
        assert!(validate_uid("91987654321x", IdentifierMode::Mobile).is_err());
        // Prefix plus more than 14 digits.
        assert!(validate_uid("91123456789012345", IdentifierMode::Mobile).is_err());
    }

    #[test]
    fn test_uid_error_names_mode() {
        let err = validate_uid("nope", IdentifierMode::Mobile).unwrap_err();
        assert_eq!(err.to_string(), "Invalid mobile provided.");
    }

    #[test]
    fn test_otp_passcode() {
        assert!(validate_passcode("126548", SecretMode::Otp).is_ok());
        assert!(validate_passcode("12654", SecretMode::Otp).is_err());
        assert!(validate_passcode("1265489", SecretMode::Otp).is_err());
        assert!(validate_passcode("12a548", SecretMode::Otp).is_err());
        assert!(validate_passcode("", SecretMode::Otp).is_err());
    }

    #[test]
    fn test_password_passcode() {
        assert!(validate_passcode("Password123", SecretMode::Password).is_ok());
        assert!(validate_passcode("Password@133", SecretMode::Password).is_ok());
        assert!(validate_passcode("short", SecretMode::Password).is_err());
        assert!(validate_passcode(&"p".repeat(31), SecretMode::Password).is_err());
        // Six digits are not a valid password.
        assert!(validate_passcode("126548", SecretMode::Password).is_err());
    }
}
