//! SQL text for the `people` table, including the dynamic filter query.

use rusqlite::types::Value;

use roster_core::person::PersonFilter;

/// Column list shared by every statement that returns rows; the order must
/// match [`crate::encode::RawPerson::from_row`].
pub const COLUMNS: &str =
  "id, name, surname, patronymic, age, gender, nationality";

/// A statement and its positional arguments. `args[n - 1]` binds `?n`.
#[derive(Debug)]
pub struct Select {
  pub sql:  String,
  pub args: Vec<Value>,
}

/// Build the `SELECT` for `filter`.
///
/// Each populated field appends its clause and its argument together, so
/// the placeholder number is always the argument's position.
pub fn select_people(filter: &PersonFilter) -> Select {
  let mut clauses: Vec<String> = Vec::new();
  let mut args: Vec<Value> = Vec::new();

  let mut push = |column: &str, value: Value| {
    args.push(value);
    clauses.push(format!("{column} = ?{}", args.len()));
  };

  if let Some(id) = filter.id {
    push("id", Value::Integer(id));
  }
  if let Some(name) = &filter.name {
    push("name", Value::Text(name.clone()));
  }
  if let Some(surname) = &filter.surname {
    push("surname", Value::Text(surname.clone()));
  }
  if let Some(patronymic) = &filter.patronymic {
    push("patronymic", Value::Text(patronymic.clone()));
  }
  if let Some(age) = filter.age {
    push("age", Value::Integer(i64::from(age)));
  }
  if let Some(gender) = filter.gender {
    push("gender", Value::Text(gender.code().to_owned()));
  }
  if let Some(nationality) = &filter.nationality {
    push("nationality", Value::Text(nationality.clone()));
  }

  let where_clause = if clauses.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", clauses.join(" AND "))
  };

  Select {
    sql: format!("SELECT {COLUMNS} FROM people{where_clause} ORDER BY id"),
    args,
  }
}
