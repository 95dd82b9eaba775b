//! Student contact list (ALUTEL).
//!
//! Each student takes a line with the registration, the name and, after a
//! wide gap, the phone number, followed by a line with the e-mail address.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    Error, Line, LineCursor, Merge, ParseOptions, Parsed, ReportKind,
    assemble::{Grammar, Transition, assemble},
    classify::{self, Classifier},
    extract::{captures, group},
    preprocess,
};
use crate::domain::Contact;

static STUDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d\d/\d{5,}) +(\w.*?)\s*$").expect("valid student pattern")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\S+@\S+)\s*$").expect("valid e-mail pattern"));

const PHONE_GAP: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration;

impl classify::Role for Registration {
    fn name(self) -> &'static str {
        "student"
    }
}

static CLASSIFIER: LazyLock<Classifier<Registration>> = LazyLock::new(|| {
    Classifier::new(ReportKind::Contacts).rule(Registration, 0, r"^\s*\d\d/\d{5,} ")
});

/// Contacts keyed by registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Contacts {
    /// Contacts keyed by registration.
    pub contacts: BTreeMap<String, Contact>,
}

impl Merge for Contacts {
    fn merge(&mut self, later: Self) {
        self.contacts.extend(later.contacts);
    }
}

/// Parses a student contact list.
///
/// A student without an e-mail line is kept with no e-mail.
///
/// # Errors
///
/// Returns an error if a registration is not followed by a name.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed<Contacts>, Error> {
    let lines = preprocess(text, ReportKind::Contacts)?;
    let parsed = assemble(&mut ContactsGrammar, &lines, options.on_malformed_section)?;
    tracing::info!("{} contacts", parsed.records.contacts.len());
    Ok(parsed)
}

struct ContactsGrammar;

impl Grammar for ContactsGrammar {
    type Role = Registration;
    type Record = Contact;
    type SubRecord = ();
    type Output = Contacts;

    const KIND: ReportKind = ReportKind::Contacts;

    fn classifier(&self) -> &Classifier<Registration> {
        &CLASSIFIER
    }

    fn transition(&self, _role: Registration) -> Transition {
        Transition::NewRecord
    }

    fn open_record(
        &mut self,
        _role: Registration,
        line: &Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Contact, Error> {
        let caps = captures(Self::KIND, line, &STUDENT, "a registration and name")?;
        let name_and_phone = group(&caps, 2);

        let (name, phone) = match name_and_phone.split_once(PHONE_GAP) {
            Some((name, _)) => {
                let phone = name_and_phone.rsplit(PHONE_GAP).next().unwrap_or_default().trim();
                (name.trim(), Some(phone).filter(|phone| !phone.is_empty()))
            }
            None => (name_and_phone, None),
        };

        Ok(Contact {
            registration: group(&caps, 1).to_string(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            email: None,
        })
    }

    fn extend_record(&mut self, record: &mut Contact, line: &Line<'_>) -> Result<bool, Error> {
        if record.email.is_some() {
            return Ok(false);
        }
        let Some(email) = EMAIL.captures(line.text) else {
            return Ok(false);
        };
        record.email = Some(group(&email, 1).to_string());
        Ok(true)
    }

    fn seal_record(&mut self, output: &mut Contacts, record: Contact) -> Result<(), Error> {
        if record.email.is_none() {
            tracing::debug!("no e-mail listed for {}", record.registration);
        }
        output.contacts.insert(record.registration.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Universidade de Brasília - Telefones de Alunos
  14/0012345  ANA MARIA SOUZA                  (61) 3333-4444
              ana.souza@example.com
  14/0054321  BRUNO COSTA
              bruno@example.com
  15/0011111  CARLA DIAS         (61) 9999-0000
";

    #[test]
    fn name_phone_and_email_are_split() {
        let parsed = parse(REPORT, &ParseOptions::default()).unwrap();
        let ana = &parsed.records.contacts["14/0012345"];

        assert_eq!(ana.name, "ANA MARIA SOUZA");
        assert_eq!(ana.phone.as_deref(), Some("(61) 3333-4444"));
        assert_eq!(ana.email.as_deref(), Some("ana.souza@example.com"));
    }

    #[test]
    fn phone_is_optional() {
        let parsed = parse(REPORT, &ParseOptions::default()).unwrap();
        let bruno = &parsed.records.contacts["14/0054321"];

        assert_eq!(bruno.name, "BRUNO COSTA");
        assert_eq!(bruno.phone, None);
        assert_eq!(bruno.email.as_deref(), Some("bruno@example.com"));
    }

    #[test]
    fn email_is_optional() {
        let parsed = parse(REPORT, &ParseOptions::default()).unwrap();
        let carla = &parsed.records.contacts["15/0011111"];

        assert_eq!(carla.phone.as_deref(), Some("(61) 9999-0000"));
        assert_eq!(carla.email, None);
        assert_eq!(parsed.summary.records, 3);
        assert_eq!(parsed.summary.ignored_lines, 1);
    }

    #[test]
    fn registration_without_name_is_a_field_error() {
        let error = parse("  14/0012345   \n", &ParseOptions::default()).unwrap_err();
        assert!(matches!(error, Error::FieldExtraction { line: 0, .. }));
    }
}
