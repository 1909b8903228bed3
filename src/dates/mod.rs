//! Validity checks for date values under their declared encodings.
//!
//! Each encoding gets a small recursive-descent check over the token stream
//! from [`lexer`]. Calendar validity (month lengths, leap years) is delegated
//! to chrono once a date is fully specified.
//!
//! EDTF coverage: levels 0-2 common forms, i.e. qualifiers `? ~ %`,
//! unspecified `X` digits, intervals with open (`..`) or unknown (empty)
//! ends, seasons 21-41, negative years, `Y`-prefixed long years such as
//! `Y-20555`, and `[..]`/`{..}` sets.

pub mod lexer;

use chrono::NaiveDate;
use lexer::{DateToken, Token, tokenize};

/// Encodings a date node may declare in `encoding.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateEncoding {
    Edtf,
    W3cdtf,
    Iso8601,
    Marc,
}

impl DateEncoding {
    /// Parse an encoding code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "edtf" => Some(Self::Edtf),
            "w3cdtf" => Some(Self::W3cdtf),
            "iso8601" => Some(Self::Iso8601),
            "marc" => Some(Self::Marc),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Edtf => "edtf",
            Self::W3cdtf => "w3cdtf",
            Self::Iso8601 => "iso8601",
            Self::Marc => "marc",
        }
    }
}

/// Whether `value` is a valid date under `encoding`.
pub fn is_valid(value: &str, encoding: DateEncoding) -> bool {
    let Some(tokens) = tokenize(value) else {
        return false;
    };
    if tokens.is_empty() {
        return false;
    }
    let mut cursor = Cursor { tokens: &tokens, pos: 0 };
    let ok = match encoding {
        DateEncoding::W3cdtf => cursor.w3cdtf(),
        DateEncoding::Iso8601 => cursor.iso8601(),
        DateEncoding::Edtf => cursor.edtf(),
        DateEncoding::Marc => cursor.marc(),
    };
    ok && cursor.at_end()
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn peek(&self) -> Option<DateToken> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn eat(&mut self, kind: DateToken) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a number token whose text satisfies `accept`.
    fn number(&mut self, accept: impl Fn(&str) -> bool) -> Option<&'a str> {
        let token = self.tokens.get(self.pos)?;
        if token.kind == DateToken::Number && accept(token.text) {
            self.pos += 1;
            Some(token.text)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // W3CDTF: YYYY[-MM[-DD[Thh:mm[:ss[.s]]TZD]]]
    // ------------------------------------------------------------------

    fn w3cdtf(&mut self) -> bool {
        let Some(year) = self.number(|t| is_digits(t, 4)) else {
            return false;
        };
        if !self.eat(DateToken::Dash) {
            return true;
        }
        let Some(month) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if !valid_month(month) {
            return false;
        }
        if !self.eat(DateToken::Dash) {
            return true;
        }
        let Some(day) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if !valid_calendar_date(year, month, day) {
            return false;
        }
        if !self.eat(DateToken::Time) {
            return true;
        }
        self.extended_time(true)
    }

    /// hh:mm[:ss[.s]] followed by a zone designator (required when `zone_required`).
    fn extended_time(&mut self, zone_required: bool) -> bool {
        let Some(hour) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if !self.eat(DateToken::Colon) {
            return false;
        }
        let Some(minute) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if parse(hour) > 23 || parse(minute) > 59 {
            return false;
        }
        if self.eat(DateToken::Colon) {
            let Some(second) = self.number(|t| is_digits(t, 2)) else {
                return false;
            };
            if parse(second) > 59 {
                return false;
            }
            if self.eat(DateToken::Dot) && self.number(|t| is_digits_any(t)).is_none() {
                return false;
            }
        }
        self.zone(zone_required)
    }

    fn zone(&mut self, required: bool) -> bool {
        if self.eat(DateToken::Utc) {
            return true;
        }
        if self.eat(DateToken::Plus) || self.eat(DateToken::Dash) {
            let Some(hours) = self.number(|t| is_digits(t, 2)) else {
                return false;
            };
            if !self.eat(DateToken::Colon) {
                return false;
            }
            let Some(minutes) = self.number(|t| is_digits(t, 2)) else {
                return false;
            };
            return parse(hours) <= 14 && parse(minutes) <= 59;
        }
        !required
    }

    // ------------------------------------------------------------------
    // ISO 8601: extended or basic dates, optional time, optional interval
    // ------------------------------------------------------------------

    fn iso8601(&mut self) -> bool {
        if !self.iso_date() {
            return false;
        }
        if self.eat(DateToken::Slash) {
            return self.iso_date();
        }
        true
    }

    fn iso_date(&mut self) -> bool {
        // Basic format: YYYYMMDD[Thhmmss]
        if let Some(basic) = self.number(|t| is_digits(t, 8)) {
            let (year, rest) = basic.split_at(4);
            let (month, day) = rest.split_at(2);
            if !valid_calendar_date(year, month, day) {
                return false;
            }
            if self.eat(DateToken::Time) {
                let Some(time) = self.number(|t| is_digits(t, 4) || is_digits(t, 6)) else {
                    return false;
                };
                let hour = parse(&time[0..2]);
                let minute = parse(&time[2..4]);
                let second = if time.len() == 6 { parse(&time[4..6]) } else { 0 };
                if hour > 23 || minute > 59 || second > 59 {
                    return false;
                }
                return self.zone(false);
            }
            return true;
        }

        let Some(year) = self.number(|t| is_digits(t, 4)) else {
            return false;
        };
        if !self.eat(DateToken::Dash) {
            return true;
        }
        let Some(month) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if !valid_month(month) {
            return false;
        }
        if !self.eat(DateToken::Dash) {
            return true;
        }
        let Some(day) = self.number(|t| is_digits(t, 2)) else {
            return false;
        };
        if !valid_calendar_date(year, month, day) {
            return false;
        }
        if self.eat(DateToken::Time) {
            return self.extended_time(false);
        }
        true
    }

    // ------------------------------------------------------------------
    // MARC: four characters of digits or `u`
    // ------------------------------------------------------------------

    fn marc(&mut self) -> bool {
        self.number(|t| t.len() == 4 && t.chars().all(|c| c.is_ascii_digit() || c == 'u'))
            .is_some()
    }

    // ------------------------------------------------------------------
    // EDTF
    // ------------------------------------------------------------------

    fn edtf(&mut self) -> bool {
        match self.peek() {
            Some(DateToken::LBracket) => return self.edtf_set(DateToken::RBracket),
            Some(DateToken::LBrace) => return self.edtf_set(DateToken::RBrace),
            _ => {}
        }

        // Unknown start: "/1985"
        if self.eat(DateToken::Slash) {
            return self.edtf_interval_end();
        }
        // Open start: "../1985"
        if self.peek() == Some(DateToken::Open) {
            self.pos += 1;
            if !self.eat(DateToken::Slash) {
                return false;
            }
            return self.edtf_date();
        }

        if !self.edtf_date() {
            return false;
        }
        if self.eat(DateToken::Slash) {
            if self.at_end() || self.eat(DateToken::Open) {
                return true;
            }
            return self.edtf_date();
        }
        true
    }

    fn edtf_interval_end(&mut self) -> bool {
        if self.eat(DateToken::Open) {
            return true;
        }
        self.edtf_date()
    }

    fn edtf_set(&mut self, close: DateToken) -> bool {
        self.pos += 1;
        loop {
            if self.eat(DateToken::Open) {
                if !self.edtf_date() {
                    return false;
                }
            } else {
                if !self.edtf_date() {
                    return false;
                }
                if self.eat(DateToken::Open) && !self.is_set_delimiter(close) && !self.edtf_date()
                {
                    return false;
                }
            }
            if self.eat(DateToken::Comma) {
                continue;
            }
            return self.eat(close);
        }
    }

    fn is_set_delimiter(&self, close: DateToken) -> bool {
        matches!(self.peek(), Some(k) if k == close || k == DateToken::Comma)
    }

    fn qualifier(&mut self) {
        let _ = self.eat(DateToken::Uncertain)
            || self.eat(DateToken::Approximate)
            || self.eat(DateToken::UncertainApproximate);
    }

    fn edtf_date(&mut self) -> bool {
        // Long years: Y[-]digits (more than four digits)
        if self.eat(DateToken::YearPrefix) {
            let _ = self.eat(DateToken::Dash);
            return self
                .number(|t| t.len() > 4 && t.chars().all(|c| c.is_ascii_digit()))
                .is_some();
        }

        self.qualifier();
        let _ = self.eat(DateToken::Dash);
        let Some(year) = self.number(|t| t.len() == 4 && is_edtf_digits(t)) else {
            return false;
        };
        self.qualifier();
        if !self.eat(DateToken::Dash) {
            return true;
        }

        self.qualifier();
        let Some(month) = self.number(|t| t.len() == 2 && is_edtf_digits(t)) else {
            return false;
        };
        if !valid_edtf_month(month) {
            return false;
        }
        self.qualifier();
        if !self.eat(DateToken::Dash) {
            return true;
        }
        if parse(month) > 12 {
            // Seasons have no day component.
            return false;
        }

        self.qualifier();
        let Some(day) = self.number(|t| t.len() == 2 && is_edtf_digits(t)) else {
            return false;
        };
        if is_digits(year, 4) && is_digits(month, 2) && is_digits(day, 2) {
            if !valid_calendar_date(year, month, day) {
                return false;
            }
        } else if !day.contains('X') && !(1..=31).contains(&parse(day)) {
            return false;
        }
        self.qualifier();

        if self.eat(DateToken::Time) {
            return self.extended_time(false);
        }
        true
    }
}

fn is_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.chars().all(|c| c.is_ascii_digit())
}

fn is_digits_any(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn is_edtf_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == 'X')
}

fn parse(text: &str) -> u32 {
    text.parse().unwrap_or(u32::MAX)
}

fn valid_month(month: &str) -> bool {
    (1..=12).contains(&parse(month))
}

fn valid_edtf_month(month: &str) -> bool {
    if month.contains('X') {
        return month == "XX" || month == "0X" || month == "1X";
    }
    let m = parse(month);
    (1..=12).contains(&m) || (21..=41).contains(&m)
}

fn valid_calendar_date(year: &str, month: &str, day: &str) -> bool {
    let (Ok(y), Ok(m), Ok(d)) = (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return false;
    };
    NaiveDate::from_ymd_opt(y, m, d).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2021")]
    #[case("2021-03")]
    #[case("2021-03-04")]
    #[case("2021-03-04T10:15Z")]
    #[case("2021-03-04T10:15:30.25+01:00")]
    fn test_w3cdtf_valid(#[case] value: &str) {
        assert!(is_valid(value, DateEncoding::W3cdtf), "{value}");
    }

    #[rstest]
    #[case("21")]
    #[case("2021-13")]
    #[case("2021-02-30")]
    #[case("2021-03-04T10:15")]
    #[case("2021/2022")]
    #[case("circa 2021")]
    fn test_w3cdtf_invalid(#[case] value: &str) {
        assert!(!is_valid(value, DateEncoding::W3cdtf), "{value}");
    }

    #[rstest]
    #[case("2004-02-29")]
    #[case("20040229")]
    #[case("20040229T101500")]
    #[case("2004-02-29T10:15")]
    #[case("2004/2005")]
    fn test_iso8601_valid(#[case] value: &str) {
        assert!(is_valid(value, DateEncoding::Iso8601), "{value}");
    }

    #[rstest]
    #[case("20030229")]
    #[case("2004-2")]
    fn test_iso8601_invalid(#[case] value: &str) {
        assert!(!is_valid(value, DateEncoding::Iso8601), "{value}");
    }

    #[rstest]
    #[case("1985")]
    #[case("1985-04-12")]
    #[case("1985-04-12T23:20:30")]
    #[case("1984?")]
    #[case("2004-06~")]
    #[case("2004-06-11%")]
    #[case("19XX")]
    #[case("2004-XX")]
    #[case("1985-04/1985-06")]
    #[case("1985/..")]
    #[case("../1985")]
    #[case("/1985")]
    #[case("1985/")]
    #[case("-1985")]
    #[case("Y170000002")]
    #[case("Y-20555")]
    #[case("2001-21")]
    #[case("?2004-06-~11")]
    #[case("[1667,1668,1670..1672]")]
    #[case("{1667,1668}")]
    #[case("[..1760-12-03]")]
    fn test_edtf_valid(#[case] value: &str) {
        assert!(is_valid(value, DateEncoding::Edtf), "{value}");
    }

    #[rstest]
    #[case("1985-13")]
    #[case("1985-02-30")]
    #[case("Y2020")]
    #[case("2001-21-01")]
    #[case("1985-04-12T25:00:00")]
    #[case("ca. 1985")]
    fn test_edtf_invalid(#[case] value: &str) {
        assert!(!is_valid(value, DateEncoding::Edtf), "{value}");
    }

    #[rstest]
    #[case("1985", true)]
    #[case("19uu", true)]
    #[case("198", false)]
    #[case("19XX", false)]
    fn test_marc(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid(value, DateEncoding::Marc), expected, "{value}");
    }

    #[test]
    fn test_encoding_codes() {
        assert_eq!(DateEncoding::from_code("W3CDTF"), Some(DateEncoding::W3cdtf));
        assert_eq!(DateEncoding::from_code("temper"), None);
        assert_eq!(DateEncoding::Edtf.code(), "edtf");
    }
}
