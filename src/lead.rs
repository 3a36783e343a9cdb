pub const PHONE_PREFIX: &str = "+7";
const PHONE_DIGITS: usize = 11;
const MIN_NAME_CHARS: usize = 2;

pub const NAME_REQUIRED: &str = "Введите ваше имя";
pub const NAME_TOO_SHORT: &str = "Имя должно содержать минимум 2 символа";
pub const PHONE_REQUIRED: &str = "Введите номер телефона";
pub const PHONE_INVALID: &str = "Введите корректный номер телефона";

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn clamped(s: &str, start: usize, end: usize) -> &str {
    let end = end.min(s.len());
    if start >= end {
        ""
    } else {
        &s[start..end]
    }
}

/// Formats raw input as `+7 (XXX) XXX-XX-XX`, filling groups as digits arrive.
/// A leading 8 is read as the trunk prefix and replaced by 7.
pub fn format_phone(input: &str) -> String {
    let mut value = digits(input);
    if let Some(first) = value.chars().next() {
        if first == '8' {
            value.replace_range(0..1, "7");
        } else if first != '7' {
            value.insert(0, '7');
        }
    }

    let len = value.len();
    let mut formatted = String::from(PHONE_PREFIX);
    if len > 1 {
        formatted.push_str(" (");
        formatted.push_str(clamped(&value, 1, 4));
    }
    if len >= 5 {
        formatted.push_str(") ");
        formatted.push_str(clamped(&value, 4, 7));
    }
    if len >= 8 {
        formatted.push('-');
        formatted.push_str(clamped(&value, 7, 9));
    }
    if len >= 10 {
        formatted.push('-');
        formatted.push_str(clamped(&value, 9, 11));
    }
    formatted
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadErrors {
    pub name: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl LeadErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

pub fn validate(name: &str, phone: &str) -> LeadErrors {
    let name = name.trim();
    let phone = phone.trim();

    let name_error = if name.is_empty() {
        Some(NAME_REQUIRED)
    } else if name.chars().count() < MIN_NAME_CHARS {
        Some(NAME_TOO_SHORT)
    } else {
        None
    };

    let phone_error = if phone.is_empty() {
        Some(PHONE_REQUIRED)
    } else if digits(phone).len() != PHONE_DIGITS {
        Some(PHONE_INVALID)
    } else {
        None
    };

    LeadErrors {
        name: name_error,
        phone: phone_error,
    }
}

/// Honeypot: the hidden `website` field is only ever filled in by bots.
pub fn is_bot(honeypot: &str) -> bool {
    !honeypot.is_empty()
}

pub fn encode_form(name: &str, phone: &str) -> String {
    format!(
        "name={}&phone={}",
        urlencoding::encode(name.trim()),
        urlencoding::encode(phone.trim())
    )
}
