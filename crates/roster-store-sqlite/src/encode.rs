//! Decoding rows of the `people` table into domain types.

use roster_core::person::{Gender, Person};

use crate::{Error, Result};

/// Raw values read directly from a `people` row, in [`crate::query::COLUMNS`]
/// order.
pub struct RawPerson {
  pub id:          i64,
  pub name:        String,
  pub surname:     String,
  pub patronymic:  Option<String>,
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      surname:     row.get(2)?,
      patronymic:  row.get(3)?,
      age:         row.get(4)?,
      gender:      row.get(5)?,
      nationality: row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    let gender = Gender::from_code(&self.gender).ok_or(Error::UnknownGender {
      id:   self.id,
      code: self.gender.clone(),
    })?;

    Ok(Person {
      id: self.id,
      name: self.name,
      surname: self.surname,
      patronymic: self.patronymic.unwrap_or_default(),
      age: self.age,
      gender,
      nationality: self.nationality,
    })
  }
}
