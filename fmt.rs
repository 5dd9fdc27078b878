use crate::array::Array;
use crate::dim::Dimension;
use std::fmt;

/**
Render the array as nested brackets. The innermost axis prints as a single flat line `[ a, b, c ]`. Every outer axis prints as a multi-line block, one sub-array per line, indented two spaces per depth, so the bracket structure mirrors the dimensionality. An empty axis prints as `[ ]`.
*/
impl<T, D> fmt::Display for Array<T, D>
where
	T: fmt::Display,
	D: Dimension,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let block = Block {
			data: self.as_slice(),
			shape: self.shape(),
			depth: 0,
		};
		write!(f, "{}", block)
	}
}

struct Block<'a, T> {
	data: &'a [T],
	shape: &'a [usize],
	depth: usize,
}

impl<'a, T> fmt::Display for Block<'a, T>
where
	T: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let n = self.shape[0];
		if n == 0 {
			return write!(f, "[ ]");
		}
		if self.shape.len() == 1 {
			write!(f, "[ ")?;
			for (i, element) in self.data.iter().enumerate() {
				if i > 0 {
					write!(f, ", ")?;
				}
				write!(f, "{}", element)?;
			}
			return write!(f, " ]");
		}
		let block = self.shape[1..].iter().product::<usize>();
		writeln!(f, "[")?;
		for i in 0..n {
			for _ in 0..(self.depth + 1) * 2 {
				write!(f, " ")?;
			}
			let sub = Block {
				data: &self.data[i * block..(i + 1) * block],
				shape: &self.shape[1..],
				depth: self.depth + 1,
			};
			write!(f, "{}", sub)?;
			if i != n - 1 {
				write!(f, ",")?;
			}
			writeln!(f)?;
		}
		for _ in 0..self.depth * 2 {
			write!(f, " ")?;
		}
		write!(f, "]")
	}
}

#[cfg(test)]
use crate::array::{arr1, arr2, arr3, Array1, Array2};

#[test]
fn test_display_flat() {
	insta::assert_snapshot!(arr1(&[1, 2, 3]).to_string(), @"[ 1, 2, 3 ]");
	insta::assert_snapshot!(arr1(&["a", "b"]).to_string(), @"[ a, b ]");
	insta::assert_snapshot!(Array1::<i32>::from_vec(vec![]).to_string(), @"[ ]");
}

#[test]
fn test_display_nested() {
	let array = arr2(&[[1, 2, 3], [4, 5, 6]]);
	assert_eq!(array.to_string(), "[\n  [ 1, 2, 3 ],\n  [ 4, 5, 6 ]\n]");
	insta::assert_snapshot!(array.to_string(), @r###"
[
  [ 1, 2, 3 ],
  [ 4, 5, 6 ]
]
"###);
}

#[test]
fn test_display_three_dimensional() {
	let array = arr3(&[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]);
	insta::assert_snapshot!(array.to_string(), @r###"
[
  [
    [ 1, 2 ],
    [ 3, 4 ]
  ],
  [
    [ 5, 6 ],
    [ 7, 8 ]
  ]
]
"###);
}

#[test]
fn test_display_empty_axes() {
	let array = Array2::<i32>::from_nested(vec![vec![], vec![]]).unwrap();
	insta::assert_snapshot!(array.to_string(), @r###"
[
  [ ],
  [ ]
]
"###);
}
