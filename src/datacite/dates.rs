//! Events and embargo → publicationYear and dates.
//!
//! ```text
//! publicationYear  embargo release > deposit > publication
//! Submitted        deposit, else publication when there is no embargo
//! Issued           publication
//! Available        embargo release
//! Created          creation (ranges as start/end, qualifier as dateInformation)
//! ```

use super::attributes::{Date, DateType};
use crate::cocina::{Description, DescriptiveValue, Embargo, Event};

const DEPOSIT: &str = "deposit";
const PUBLICATION: &str = "publication";
const CREATION: &str = "creation";

pub(super) fn publication_year(description: &Description, embargo: Option<&Embargo>) -> Option<String> {
    if let Some(year) = embargo.and_then(Embargo::release_year) {
        return Some(year.to_string());
    }
    [DEPOSIT, PUBLICATION]
        .into_iter()
        .filter_map(|kind| event_date(description, kind))
        .find_map(|date| year(&date))
}

pub(super) fn dates(description: &Description, embargo: Option<&Embargo>) -> Vec<Date> {
    let mut dates = Vec::new();
    let deposit = event_date(description, DEPOSIT);
    let publication = event_date(description, PUBLICATION);

    let submitted = match (&deposit, embargo) {
        (Some(deposit), _) => Some(deposit.clone()),
        (None, None) => publication.clone(),
        (None, Some(_)) => None,
    };
    if let Some(date) = submitted {
        dates.push(point(date, DateType::Submitted));
    }
    if let Some(date) = publication {
        dates.push(point(date, DateType::Issued));
    }
    if let Some(embargo) = embargo {
        let release = embargo
            .release_date
            .split_once('T')
            .map_or(embargo.release_date.as_str(), |(date, _)| date);
        dates.push(point(release.to_string(), DateType::Available));
    }
    if let Some(created) = description
        .event_of(CREATION)
        .and_then(|event| event.date.first())
        .and_then(created)
    {
        dates.push(created);
    }
    dates
}

fn point(date: String, date_type: DateType) -> Date {
    Date {
        date,
        date_type,
        date_information: None,
    }
}

/// First date of the first event of the given type, a range as its start.
fn event_date(description: &Description, kind: &str) -> Option<String> {
    let event: &Event = description.event_of(kind)?;
    let date = event.date.first()?;
    date.value
        .clone()
        .or_else(|| date.part_value("start").map(str::to_string))
}

fn year(date: &str) -> Option<String> {
    date.get(..4)
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn created(date: &DescriptiveValue) -> Option<Date> {
    let (value, qualifier) = match &date.value {
        Some(value) => (value.clone(), date.qualifier.clone()),
        None => {
            let start = date.part("start")?;
            let end = date.part("end");
            let range = match end.and_then(|end| end.value.as_deref()) {
                Some(end_value) => format!("{}/{end_value}", start.value.as_deref()?),
                None => start.value.clone()?,
            };
            let qualifier = date
                .qualifier
                .clone()
                .or_else(|| start.qualifier.clone())
                .or_else(|| end.and_then(|end| end.qualifier.clone()));
            (range, qualifier)
        }
    };
    Some(Date {
        date: value,
        date_type: DateType::Created,
        date_information: qualifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cocina::{Download, View};

    fn event(kind: &str, date: &str) -> Event {
        Event {
            kind: Some(kind.to_string()),
            date: vec![DescriptiveValue::of(date)],
            ..Default::default()
        }
    }

    fn embargo(release_date: &str) -> Embargo {
        Embargo {
            release_date: release_date.to_string(),
            view: View::World,
            download: Download::World,
            location: None,
            controlled_digital_lending: false,
            use_and_reproduction_statement: None,
        }
    }

    #[test]
    fn test_embargo_year_wins_over_deposit() {
        let description = Description {
            event: vec![event(DEPOSIT, "2021-01-01")],
            ..Default::default()
        };
        let release = embargo("2022-01-01");
        assert_eq!(publication_year(&description, Some(&release)).as_deref(), Some("2022"));
        assert_eq!(publication_year(&description, None).as_deref(), Some("2021"));
    }

    #[test]
    fn test_publication_is_the_last_resort() {
        let description = Description {
            event: vec![event(PUBLICATION, "2019-05-04")],
            ..Default::default()
        };
        assert_eq!(publication_year(&description, None).as_deref(), Some("2019"));
        let kinds: Vec<_> = dates(&description, None).iter().map(|d| d.date_type).collect();
        assert_eq!(kinds, vec![DateType::Submitted, DateType::Issued]);
    }

    #[test]
    fn test_embargo_suppresses_publication_as_submitted() {
        let description = Description {
            event: vec![event(PUBLICATION, "2019-05-04")],
            ..Default::default()
        };
        let release = embargo("2029-02-28T00:00:00Z");
        let projected = dates(&description, Some(&release));
        let kinds: Vec<_> = projected.iter().map(|d| d.date_type).collect();
        assert_eq!(kinds, vec![DateType::Issued, DateType::Available]);
        assert_eq!(projected[1].date, "2029-02-28");
    }

    #[test]
    fn test_created_range_keeps_qualifier() {
        let range = DescriptiveValue {
            structured_value: vec![
                DescriptiveValue::typed("1900", "start"),
                DescriptiveValue::typed("1910", "end"),
            ],
            qualifier: Some("approximate".to_string()),
            ..Default::default()
        };
        let description = Description {
            event: vec![Event {
                kind: Some(CREATION.to_string()),
                date: vec![range],
                ..Default::default()
            }],
            ..Default::default()
        };
        let created = dates(&description, None).pop().unwrap();
        assert_eq!(created.date, "1900/1910");
        assert_eq!(created.date_type, DateType::Created);
        assert_eq!(created.date_information.as_deref(), Some("approximate"));
    }
}
