//! The `Person` record and the value types that describe reads and writes
//! against it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Gender ──────────────────────────────────────────────────────────────────

/// Normalised gender as stored in the `gender` column.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Gender {
  #[serde(rename = "m")]
  Male,
  #[serde(rename = "f")]
  Female,
}

impl Gender {
  /// Normalise a free-form label from an inference service.
  ///
  /// Only `male` and `female` (any case) are recognised; everything else,
  /// including the empty string, yields `None`.
  pub fn from_label(label: &str) -> Option<Self> {
    if label.eq_ignore_ascii_case("male") {
      Some(Self::Male)
    } else if label.eq_ignore_ascii_case("female") {
      Some(Self::Female)
    } else {
      None
    }
  }

  /// Parse the stored single-letter code.
  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "m" => Some(Self::Male),
      "f" => Some(Self::Female),
      _ => None,
    }
  }

  /// The single-letter code written to the store.
  pub fn code(self) -> &'static str {
    match self {
      Self::Male => "m",
      Self::Female => "f",
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
  pub id:          i64,
  pub name:        String,
  pub surname:     String,
  /// May be empty.
  pub patronymic:  String,
  pub age:         u32,
  pub gender:      Gender,
  /// Country code of the most probable nationality.
  #[schema(example = "US")]
  pub nationality: String,
}

/// Input to [`crate::store::PersonStore::insert`]: every column but `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:        String,
  pub surname:     String,
  pub patronymic:  String,
  pub age:         u32,
  pub gender:      Gender,
  pub nationality: String,
}

impl NewPerson {
  /// Combine caller-supplied names with an enrichment result.
  pub fn enriched(
    name: String,
    surname: String,
    patronymic: String,
    enrichment: Enrichment,
  ) -> Self {
    Self {
      name,
      surname,
      patronymic,
      age: enrichment.age,
      gender: enrichment.gender,
      nationality: enrichment.nationality,
    }
  }
}

/// The values derived from a given name by the external lookup services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
  pub age:         u32,
  pub gender:      Gender,
  pub nationality: String,
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::PersonStore::find_many`].
///
/// Every populated field adds one equality predicate; predicates are ANDed.
/// An all-`None` filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
  pub id:          Option<i64>,
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<Gender>,
  pub nationality: Option<String>,
}

impl PersonFilter {
  /// A filter matching exactly one id.
  pub fn by_id(id: i64) -> Self {
    Self { id: Some(id), ..Self::default() }
  }

  /// Whether `person` satisfies every populated predicate.
  pub fn matches(&self, person: &Person) -> bool {
    fn eq<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
      want.as_ref().is_none_or(|w| w == have)
    }

    eq(&self.id, &person.id)
      && eq(&self.name, &person.name)
      && eq(&self.surname, &person.surname)
      && eq(&self.patronymic, &person.patronymic)
      && eq(&self.age, &person.age)
      && eq(&self.gender, &person.gender)
      && eq(&self.nationality, &person.nationality)
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update. `None` fields keep the stored value (merge-on-omit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<Gender>,
  pub nationality: Option<String>,
}

impl PersonPatch {
  /// Merge this patch over `current`, keeping `current.id`.
  pub fn apply_to(self, current: &Person) -> Person {
    Person {
      id:          current.id,
      name:        self.name.unwrap_or_else(|| current.name.clone()),
      surname:     self.surname.unwrap_or_else(|| current.surname.clone()),
      patronymic:  self
        .patronymic
        .unwrap_or_else(|| current.patronymic.clone()),
      age:         self.age.unwrap_or(current.age),
      gender:      self.gender.unwrap_or(current.gender),
      nationality: self
        .nationality
        .unwrap_or_else(|| current.nationality.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alice() -> Person {
    Person {
      id:          7,
      name:        "Alice".into(),
      surname:     "Smith".into(),
      patronymic:  String::new(),
      age:         30,
      gender:      Gender::Female,
      nationality: "US".into(),
    }
  }

  #[test]
  fn gender_label_is_case_insensitive() {
    assert_eq!(Gender::from_label("Male"), Some(Gender::Male));
    assert_eq!(Gender::from_label("FEMALE"), Some(Gender::Female));
    assert_eq!(Gender::from_label("female"), Some(Gender::Female));
  }

  #[test]
  fn gender_label_rejects_everything_else() {
    assert_eq!(Gender::from_label(""), None);
    assert_eq!(Gender::from_label("m"), None);
    assert_eq!(Gender::from_label("unknown"), None);
  }

  #[test]
  fn gender_code_parses_stored_form() {
    assert_eq!(Gender::Female.to_string(), "f");
    assert_eq!(Gender::from_code("m"), Some(Gender::Male));
    assert_eq!(Gender::from_code("M"), None);
  }

  #[test]
  fn empty_patch_is_identity() {
    let current = alice();
    assert_eq!(PersonPatch::default().apply_to(&current), current);
  }

  #[test]
  fn patch_replaces_only_supplied_fields() {
    let current = alice();
    let patch = PersonPatch {
      surname: Some("Jones".into()),
      age: Some(31),
      ..PersonPatch::default()
    };
    let merged = patch.apply_to(&current);
    assert_eq!(merged.surname, "Jones");
    assert_eq!(merged.age, 31);
    assert_eq!(merged.name, current.name);
    assert_eq!(merged.gender, current.gender);
    assert_eq!(merged.nationality, current.nationality);
    assert_eq!(merged.id, current.id);
  }

  #[test]
  fn filter_matches_conjunctively() {
    let p = alice();
    assert!(PersonFilter::default().matches(&p));
    assert!(PersonFilter::by_id(7).matches(&p));
    assert!(!PersonFilter::by_id(8).matches(&p));

    let f = PersonFilter {
      name: Some("Alice".into()),
      gender: Some(Gender::Female),
      ..PersonFilter::default()
    };
    assert!(f.matches(&p));

    let f = PersonFilter {
      name: Some("Alice".into()),
      gender: Some(Gender::Male),
      ..PersonFilter::default()
    };
    assert!(!f.matches(&p));
  }
}
