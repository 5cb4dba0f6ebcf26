//! Utility functions for database operations

use campus::prelude::*;

/// Parse a comma-separated string into a boxed array of boxed strings
pub(crate) fn parse_str_list(s: &str) -> Box<[Box<str>]> {
	s.split(',')
		.map(|s| s.trim().to_owned().into_boxed_str())
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.into_boxed_slice()
}

/// Parse a comma-separated string into an Option of boxed array.
/// Returns None if the string is empty or only contains whitespace.
pub(crate) fn parse_str_list_optional(s: Option<&str>) -> Option<Box<[Box<str>]>> {
	s.and_then(|s| {
		let s = s.trim();
		if s.is_empty() { None } else { Some(parse_str_list(s)) }
	})
}

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Collapse a sqlx error to the shared taxonomy after logging it
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	match err {
		sqlx::Error::RowNotFound => Error::NotFound,
		err => {
			inspect(&err);
			Error::DbError
		}
	}
}


// vim: ts=4
