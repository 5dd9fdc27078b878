use thiserror::Error;

/**
A `Range` is one parsed slice clause, an iteration plan over a single axis: begin at `start`, advance by `step`, and stop before `stop`. When the clause leaves the stop out, `has_stop` is false and the axis length at slice time is used instead.

A `Range` is only ever built by [`parse`](#method.parse), so `step` is always positive.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
	pub start: isize,
	pub stop: isize,
	pub step: isize,
	pub has_stop: bool,
}

#[derive(Debug, Error)]
#[error("invalid slice format: {text:?}")]
pub struct InvalidSliceFormatError {
	pub text: String,
}

impl Range {
	/**
	Parse one axis clause. The accepted forms are `start:stop` and `start:stop:step`, where each of the three integers may be left out and whitespace is tolerated around tokens. A missing start means 0, a missing stop means the axis end, and a missing step means 1. Everything else is rejected, including a bare integer with no colon, which is an index rather than a slice, and a zero or negative step, which could never make forward progress.
	*/
	pub fn parse(text: &str) -> Result<Self, InvalidSliceFormatError> {
		fn int_token(text: &str, token: &str) -> Result<Option<isize>, InvalidSliceFormatError> {
			let token = token.trim();
			if token.is_empty() {
				return Ok(None);
			}
			match lexical::parse(token) {
				Ok(value) => Ok(Some(value)),
				Err(_) => Err(InvalidSliceFormatError {
					text: text.to_owned(),
				}),
			}
		}
		let parts: Vec<&str> = text.split(':').collect();
		let (start, stop, step) = match parts.as_slice() {
			[start, stop] => (*start, *stop, None),
			[start, stop, step] => (*start, *stop, Some(*step)),
			_ => {
				return Err(InvalidSliceFormatError {
					text: text.to_owned(),
				})
			}
		};
		let start = int_token(text, start)?.unwrap_or(0);
		let (stop, has_stop) = match int_token(text, stop)? {
			Some(stop) => (stop, true),
			None => (0, false),
		};
		let step = match step {
			Some(step) => int_token(text, step)?.unwrap_or(1),
			None => 1,
		};
		if step < 1 {
			return Err(InvalidSliceFormatError {
				text: text.to_owned(),
			});
		}
		Ok(Range {
			start,
			stop,
			step,
			has_stop,
		})
	}
}

#[test]
fn test_parse_forms() {
	fn test(text: &str, start: isize, stop: isize, step: isize, has_stop: bool) {
		assert_eq!(
			Range::parse(text).unwrap(),
			Range {
				start,
				stop,
				step,
				has_stop
			}
		);
	}
	test("1:5:2", 1, 5, 2, true);
	test("2:", 2, 0, 1, false);
	test(":3", 0, 3, 1, true);
	test(":", 0, 0, 1, false);
	test("::", 0, 0, 1, false);
	test("::2", 0, 0, 2, false);
	test("-3:-1", -3, -1, 1, true);
	test(" 1 : 5 : 2 ", 1, 5, 2, true);
	test("5:1", 5, 1, 1, true);
}

#[test]
fn test_parse_rejects_invalid() {
	fn test(text: &str) {
		assert!(Range::parse(text).is_err());
	}
	test("");
	test("1");
	test("abc");
	test("a:b");
	test("1:2:3:4");
	test("1.5:2");
	test("1 2:3");
	test("::0");
	test("::-1");
	test("0:5:-2");
}
