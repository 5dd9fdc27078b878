use crate::dim::{Dim, Dimension, InsertAxis, IntoDimension, Ix1, Ix2, Ix3, Ix4, Ix5, Ix6, RemoveAxis};
use crate::range::{InvalidSliceFormatError, Range};
use itertools::izip;
use num_traits::Zero;
use thiserror::Error;

/**
An `Array` is an owned, rectangular, *n*-dimensional array of elements of type `T`, stored contiguously in row major order. The number of axes is fixed at compile time by the dimension parameter `D`, usually written through the [`Array1`](type.Array1.html) through [`Array6`](type.Array6.html) aliases.

Indexing with [`at`](#method.at) takes between 1 and *n* indices: the full *n* indices select a single element and return a reference to it, fewer select a lower dimensional sub-array and return it as a new owned array. Negative indices count back from the end of their axis. [`slice`](#method.slice) takes a NumPy-style slice string with one clause per axis and returns a new array that shares no storage with the original.

# Example

```
use ndslice::arr2;

let array = arr2(&[[1, 2, 3], [4, 5, 6]]);
assert_eq!(*array.at([1, 2]).unwrap(), 6);
assert_eq!(*array.at([-1, -1]).unwrap(), 6);
assert_eq!(array.slice(":,1:").unwrap(), arr2(&[[2, 3], [5, 6]]));
```
*/
#[derive(Clone, Debug, PartialEq)]
pub struct Array<T, D>
where
	D: Dimension,
{
	data: Vec<T>,
	shape: D,
	strides: D,
}

pub type Array1<T> = Array<T, Ix1>;
pub type Array2<T> = Array<T, Ix2>;
pub type Array3<T> = Array<T, Ix3>;
pub type Array4<T> = Array<T, Ix4>;
pub type Array5<T> = Array<T, Ix5>;
pub type Array6<T> = Array<T, Ix6>;

#[derive(Debug, Error)]
#[error("index {index} out of range for axis of length {len}")]
pub struct IndexOutOfRangeError {
	pub index: isize,
	pub len: usize,
}

#[derive(Debug, Error)]
#[error("too many slices: {provided} clauses for an array with {ndim} dimensions")]
pub struct TooManySlicesError {
	pub provided: usize,
	pub ndim: usize,
}

#[derive(Debug, Error)]
#[error("jagged nested literal: expected sub-array shape {expected:?}, found {found:?}")]
pub struct JaggedLiteralError {
	pub expected: Vec<usize>,
	pub found: Vec<usize>,
}

#[derive(Debug, Error)]
pub enum SliceError {
	#[error(transparent)]
	InvalidSliceFormat(#[from] InvalidSliceFormatError),
	#[error(transparent)]
	TooManySlices(#[from] TooManySlicesError),
	#[error(transparent)]
	IndexOutOfRange(#[from] IndexOutOfRangeError),
}

/// Resolve a possibly negative index against an axis length.
fn resolve_index(index: isize, len: usize) -> Result<usize, IndexOutOfRangeError> {
	let resolved = if index < 0 { index + len as isize } else { index };
	if resolved < 0 || resolved as usize >= len {
		return Err(IndexOutOfRangeError { index, len });
	}
	Ok(resolved as usize)
}

fn offset_checked<D>(shape: &D, strides: &D, index: &[isize]) -> Result<usize, IndexOutOfRangeError>
where
	D: Dimension,
{
	let mut offset = 0;
	for (len, stride, index) in izip!(shape.slice(), strides.slice(), index) {
		offset += resolve_index(*index, *len)? * stride;
	}
	Ok(offset)
}

/// Resolve one clause against its axis length, producing the storage indices it selects, in order. A start at or beyond the stop selects nothing rather than failing; every selected index goes through the same negative wraparound check as plain indexing.
fn resolve_range(range: &Range, len: usize) -> Result<Vec<usize>, IndexOutOfRangeError> {
	let stop = if range.has_stop {
		range.stop
	} else {
		len as isize
	};
	let mut indices = Vec::new();
	let mut index = range.start;
	while index < stop {
		indices.push(resolve_index(index, len)?);
		index += range.step;
	}
	Ok(indices)
}

impl<T, D> Array<T, D>
where
	D: Dimension,
{
	fn from_shape_vec(shape: D, data: Vec<T>) -> Self {
		debug_assert_eq!(shape.size(), data.len());
		let strides = shape.row_major_strides();
		Self {
			data,
			shape,
			strides,
		}
	}

	/// Build a rectangular array of the given per-axis extents with every element a clone of `elem`.
	pub fn from_elem<I>(shape: I, elem: T) -> Self
	where
		I: IntoDimension<Dim = D>,
		T: Clone,
	{
		let shape = shape.into_dimension();
		let data = vec![elem; shape.size()];
		Self::from_shape_vec(shape, data)
	}

	pub fn zeros<I>(shape: I) -> Self
	where
		I: IntoDimension<Dim = D>,
		T: Zero + Clone,
	{
		Self::from_elem(shape, T::zero())
	}

	/// The axis lengths, outermost axis first.
	pub fn shape(&self) -> &[usize] {
		self.shape.slice()
	}

	pub fn ndim(&self) -> usize {
		D::NDIM
	}

	/// The total number of elements.
	pub fn size(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// The elements in row major order.
	pub fn as_slice(&self) -> &[T] {
		&self.data
	}

	pub fn iter(&self) -> std::slice::Iter<T> {
		self.data.iter()
	}

	/**
	Index into the array with between 1 and *n* indices. Passing the full *n* indices as `[i0, ..., in]` returns a reference to a single element. Passing fewer returns the selected sub-array of correspondingly lower dimension as a new owned array; a bare integer is accepted as the one-index form. Passing more than *n* indices does not type check.

	A negative index `i` resolves to `i + len` for its axis; an index that still falls outside the axis after that fails with [`IndexOutOfRangeError`](struct.IndexOutOfRangeError.html).
	*/
	pub fn at<'a, I>(&'a self, index: I) -> Result<I::Output, IndexOutOfRangeError>
	where
		I: ArrayIndex<'a, T, D>,
	{
		index.index_into(self)
	}

	/// Like [`at`](#method.at) with the full *n* indices, but returns a mutable reference to the element.
	pub fn at_mut<'a, I>(&'a mut self, index: I) -> Result<I::Output, IndexOutOfRangeError>
	where
		I: ArrayIndexMut<'a, T, D>,
	{
		index.index_into_mut(self)
	}

	/// Copy out the sub-array at `index` along the outermost axis.
	pub fn subarray(&self, index: isize) -> Result<Array<T, D::Smaller>, IndexOutOfRangeError>
	where
		D: RemoveAxis,
		T: Clone,
	{
		let index = resolve_index(index, self.shape.slice()[0])?;
		let shape = self.shape.remove_outer_axis();
		let block = shape.size();
		let offset = index * block;
		let data = self.data[offset..offset + block].to_vec();
		Ok(Array::from_shape_vec(shape, data))
	}

	/// Wrap the array as the sole element along a new outermost axis, raising its dimension by one.
	pub fn insert_axis(self) -> Array<T, <D as InsertAxis>::Larger>
	where
		D: InsertAxis,
	{
		Array::from_shape_vec(self.shape.insert_outer_axis(1), self.data)
	}

	/**
	Slice the array with a NumPy-style slice string: one clause per axis, separated by commas, each clause of the form `start:stop` or `start:stop:step`. Axes beyond the last clause pass through whole. The result is a new array of the same dimensionality, shrunk along the sliced axes, holding deep copies of the selected elements.

	More clauses than the array has dimensions fail with [`TooManySlicesError`](struct.TooManySlicesError.html), a clause the grammar does not accept fails with [`InvalidSliceFormatError`](struct.InvalidSliceFormatError.html), and a stop that reaches past the end of its axis fails with [`IndexOutOfRangeError`](struct.IndexOutOfRangeError.html). A start at or beyond its axis end is not an error: it selects an empty range.
	*/
	pub fn slice(&self, spec: &str) -> Result<Self, SliceError>
	where
		T: Clone,
	{
		let clauses: Vec<&str> = spec.split(',').map(str::trim).collect();
		if clauses.len() > D::NDIM {
			return Err(TooManySlicesError {
				provided: clauses.len(),
				ndim: D::NDIM,
			}
			.into());
		}
		let ranges = clauses
			.iter()
			.map(|clause| Range::parse(clause))
			.collect::<Result<Vec<_>, _>>()?;
		// The shape is rectangular, so each clause selects the same indices for every sibling along its axis and can be resolved once up front.
		let mut picked: Vec<Vec<usize>> = Vec::with_capacity(ranges.len());
		for (range, len) in ranges.iter().zip(self.shape.slice()) {
			picked.push(resolve_range(range, *len)?);
		}
		let mut shape = self.shape.clone();
		for (len, indices) in shape.slice_mut().iter_mut().zip(picked.iter()) {
			*len = indices.len();
		}
		let mut data = Vec::with_capacity(shape.size());
		self.gather(&picked, 0, 0, &mut data);
		Ok(Self::from_shape_vec(shape, data))
	}

	fn gather(&self, picked: &[Vec<usize>], axis: usize, offset: usize, out: &mut Vec<T>)
	where
		T: Clone,
	{
		// Past the last clause the remaining block is contiguous and passes through whole.
		if axis == picked.len() {
			let block = self.shape.slice()[axis..].iter().product::<usize>();
			out.extend_from_slice(&self.data[offset..offset + block]);
			return;
		}
		let stride = self.strides.slice()[axis];
		for index in picked[axis].iter() {
			self.gather(picked, axis + 1, offset + index * stride, out);
		}
	}
}

impl<T> Array<T, Ix1> {
	pub fn from_vec(data: Vec<T>) -> Self {
		Self::from_shape_vec(Dim::new([data.len()]), data)
	}
}

impl<T> Array<T, Ix2> {
	/// Copy a nested literal into a two dimensional array. Every row must have the same length.
	pub fn from_nested(nested: Vec<Vec<T>>) -> Result<Self, JaggedLiteralError> {
		let n_rows = nested.len();
		let n_cols = nested.first().map(Vec::len).unwrap_or(0);
		let mut data = Vec::with_capacity(n_rows * n_cols);
		for row in nested {
			if row.len() != n_cols {
				return Err(JaggedLiteralError {
					expected: vec![n_cols],
					found: vec![row.len()],
				});
			}
			data.extend(row);
		}
		Ok(Self::from_shape_vec(Dim::new([n_rows, n_cols]), data))
	}
}

impl<T> Array<T, Ix3> {
	/// Copy a nested literal into a three dimensional array. Sub-array shapes must agree at every depth.
	pub fn from_nested(nested: Vec<Vec<Vec<T>>>) -> Result<Self, JaggedLiteralError> {
		let n_outer = nested.len();
		let mut inner_shape: Option<[usize; 2]> = None;
		let mut data = Vec::new();
		for child in nested {
			let child = Array::<T, Ix2>::from_nested(child)?;
			let child_shape = [child.shape()[0], child.shape()[1]];
			match inner_shape {
				None => inner_shape = Some(child_shape),
				Some(expected) if expected != child_shape => {
					return Err(JaggedLiteralError {
						expected: expected.to_vec(),
						found: child_shape.to_vec(),
					});
				}
				Some(_) => {}
			}
			data.extend(child.data);
		}
		let [n_mid, n_inner] = inner_shape.unwrap_or([0, 0]);
		Ok(Self::from_shape_vec(Dim::new([n_outer, n_mid, n_inner]), data))
	}
}

pub fn arr1<T>(xs: &[T]) -> Array1<T>
where
	T: Clone,
{
	Array::from_shape_vec(Dim::new([xs.len()]), xs.to_vec())
}

pub fn arr2<T, const N: usize>(xs: &[[T; N]]) -> Array2<T>
where
	T: Clone,
{
	let mut data = Vec::with_capacity(xs.len() * N);
	for row in xs {
		data.extend_from_slice(row);
	}
	Array::from_shape_vec(Dim::new([xs.len(), N]), data)
}

pub fn arr3<T, const N: usize, const P: usize>(xs: &[[[T; P]; N]]) -> Array3<T>
where
	T: Clone,
{
	let mut data = Vec::with_capacity(xs.len() * N * P);
	for plane in xs {
		for row in plane {
			data.extend_from_slice(row);
		}
	}
	Array::from_shape_vec(Dim::new([xs.len(), N, P]), data)
}

/**
An index argument accepted by [`Array::at`](struct.Array.html#method.at). The arity of the index determines the output: `[isize; n]` on an *n* dimensional array yields `&T`, shorter index arrays yield owned sub-arrays of correspondingly lower dimension.
*/
pub trait ArrayIndex<'a, T, D>
where
	T: 'a,
	D: Dimension,
{
	type Output;
	fn index_into(self, array: &'a Array<T, D>) -> Result<Self::Output, IndexOutOfRangeError>;
}

/// The mutable counterpart of [`ArrayIndex`](trait.ArrayIndex.html), implemented only for full-arity indices, which are the ones that resolve to a single element.
pub trait ArrayIndexMut<'a, T, D>
where
	T: 'a,
	D: Dimension,
{
	type Output;
	fn index_into_mut(self, array: &'a mut Array<T, D>)
		-> Result<Self::Output, IndexOutOfRangeError>;
}

macro_rules! impl_full_index {
	($($n:tt),*) => {
		$(
			impl<'a, T> ArrayIndex<'a, T, Dim<[usize; $n]>> for [isize; $n]
			where
				T: 'a,
			{
				type Output = &'a T;
				fn index_into(
					self,
					array: &'a Array<T, Dim<[usize; $n]>>,
				) -> Result<Self::Output, IndexOutOfRangeError> {
					let offset = offset_checked(&array.shape, &array.strides, &self)?;
					Ok(&array.data[offset])
				}
			}

			impl<'a, T> ArrayIndexMut<'a, T, Dim<[usize; $n]>> for [isize; $n]
			where
				T: 'a,
			{
				type Output = &'a mut T;
				fn index_into_mut(
					self,
					array: &'a mut Array<T, Dim<[usize; $n]>>,
				) -> Result<Self::Output, IndexOutOfRangeError> {
					let offset = offset_checked(&array.shape, &array.strides, &self)?;
					Ok(&mut array.data[offset])
				}
			}
		)*
	};
}

impl_full_index!(1, 2, 3, 4, 5, 6);

macro_rules! impl_partial_index {
	($(($n:tt, $k:tt, $m:tt)),* $(,)?) => {
		$(
			impl<'a, T> ArrayIndex<'a, T, Dim<[usize; $n]>> for [isize; $k]
			where
				T: Clone + 'a,
			{
				type Output = Array<T, Dim<[usize; $m]>>;
				fn index_into(
					self,
					array: &'a Array<T, Dim<[usize; $n]>>,
				) -> Result<Self::Output, IndexOutOfRangeError> {
					let mut offset = 0;
					for (len, stride, index) in
						izip!(array.shape.slice(), array.strides.slice(), self.iter())
					{
						offset += resolve_index(*index, *len)? * stride;
					}
					let mut shape = [0; $m];
					shape.copy_from_slice(&array.shape.slice()[$k..]);
					let shape = Dim::new(shape);
					let block = shape.size();
					let data = array.data[offset..offset + block].to_vec();
					Ok(Array::from_shape_vec(shape, data))
				}
			}
		)*
	};
}

impl_partial_index!(
	(2, 1, 1),
	(3, 1, 2),
	(3, 2, 1),
	(4, 1, 3),
	(4, 2, 2),
	(4, 3, 1),
	(5, 1, 4),
	(5, 2, 3),
	(5, 3, 2),
	(5, 4, 1),
	(6, 1, 5),
	(6, 2, 4),
	(6, 3, 3),
	(6, 4, 2),
	(6, 5, 1),
);

impl<'a, T> ArrayIndex<'a, T, Ix1> for isize
where
	T: 'a,
{
	type Output = &'a T;
	fn index_into(self, array: &'a Array<T, Ix1>) -> Result<Self::Output, IndexOutOfRangeError> {
		[self].index_into(array)
	}
}

impl<'a, T> ArrayIndexMut<'a, T, Ix1> for isize
where
	T: 'a,
{
	type Output = &'a mut T;
	fn index_into_mut(
		self,
		array: &'a mut Array<T, Ix1>,
	) -> Result<Self::Output, IndexOutOfRangeError> {
		[self].index_into_mut(array)
	}
}

macro_rules! impl_single_index {
	($($n:tt),*) => {
		$(
			impl<'a, T> ArrayIndex<'a, T, Dim<[usize; $n]>> for isize
			where
				T: Clone + 'a,
			{
				type Output = <[isize; 1] as ArrayIndex<'a, T, Dim<[usize; $n]>>>::Output;
				fn index_into(
					self,
					array: &'a Array<T, Dim<[usize; $n]>>,
				) -> Result<Self::Output, IndexOutOfRangeError> {
					array.subarray(self)
				}
			}
		)*
	};
}

impl_single_index!(2, 3, 4, 5, 6);

#[test]
fn test_negative_index_wraparound() {
	let array = arr1(&[1, 2, 3, 4, 5]);
	for k in 1..=5isize {
		assert_eq!(array.at(-k).unwrap(), array.at(5 - k).unwrap());
	}
	assert!(array.at(-6).is_err());
	assert!(array.at(5).is_err());
}

#[test]
fn test_index_arity() {
	let array = arr3(&[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]);
	assert_eq!(*array.at([1, 0, 1]).unwrap(), 6);
	assert_eq!(array.at([1, 0]).unwrap(), arr1(&[5, 6]));
	assert_eq!(array.at([1]).unwrap(), arr2(&[[5, 6], [7, 8]]));
	assert_eq!(array.at(0).unwrap(), arr2(&[[1, 2], [3, 4]]));
	assert_eq!(array.subarray(-1).unwrap(), arr2(&[[5, 6], [7, 8]]));
}

#[test]
fn test_mutation_through_at_mut() {
	let mut array = arr2(&[[1, 2, 3], [4, 5, 6]]);
	*array.at_mut([0, 0]).unwrap() = 9;
	*array.at_mut([-1, -1]).unwrap() = 0;
	assert_eq!(array, arr2(&[[9, 2, 3], [4, 5, 0]]));
}

#[test]
fn test_two_by_three() {
	let array = Array2::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
	assert_eq!(*array.at([1, 2]).unwrap(), 6);
	assert_eq!(*array.at([-1, -1]).unwrap(), 6);
	assert_eq!(array.slice(":,1:").unwrap(), arr2(&[[2, 3], [5, 6]]));
}

#[test]
fn test_full_range_clause_is_identity() {
	let array = arr2(&[[1, 2, 3], [4, 5, 6]]);
	assert_eq!(array.slice(":").unwrap(), array);
	assert_eq!(array.slice(":,:").unwrap(), array);
	assert_eq!(array.slice("::,::").unwrap(), array);
	assert_eq!(array.slice(":").unwrap().to_string(), array.to_string());
}

#[test]
fn test_slice_stepping() {
	let array = arr1(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
	assert_eq!(array.slice("1:7:2").unwrap(), arr1(&[1, 3, 5]));
	assert_eq!(array.slice("::3").unwrap(), arr1(&[0, 3, 6, 9]));
	assert_eq!(array.slice("5:").unwrap(), arr1(&[5, 6, 7, 8, 9]));
	assert_eq!(array.slice(":3").unwrap(), arr1(&[0, 1, 2]));
}

#[test]
fn test_slice_multi_axis() {
	let array = arr3(&[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]);
	assert_eq!(array.slice("1:").unwrap(), arr3(&[[[5, 6], [7, 8]]]));
	assert_eq!(array.slice(":,1:").unwrap(), arr3(&[[[3, 4]], [[7, 8]]]));
	assert_eq!(array.slice(":,:,1:").unwrap(), arr3(&[[[2], [4]], [[6], [8]]]));
}

#[test]
fn test_slice_is_a_deep_copy() {
	let source = arr1(&[1, 2, 3]);
	let mut sliced = source.slice(":").unwrap();
	*sliced.at_mut(0).unwrap() = 9;
	assert_eq!(source, arr1(&[1, 2, 3]));
	assert_eq!(sliced, arr1(&[9, 2, 3]));
}

#[test]
fn test_slice_start_past_the_end_is_empty() {
	let array = arr1(&[1, 2, 3]);
	let sliced = array.slice("7:").unwrap();
	assert_eq!(sliced.shape(), &[0]);
	assert!(sliced.is_empty());
}

#[test]
fn test_slice_stop_past_the_end_fails() {
	let array = arr1(&[1, 2, 3]);
	assert!(matches!(
		array.slice("0:7"),
		Err(SliceError::IndexOutOfRange(_))
	));
}

#[test]
fn test_slice_errors() {
	let array = arr2(&[[1, 2], [3, 4]]);
	assert!(matches!(
		array.slice(":,:,:"),
		Err(SliceError::TooManySlices(_))
	));
	assert!(matches!(
		array.slice("1"),
		Err(SliceError::InvalidSliceFormat(_))
	));
	assert!(matches!(
		array.slice("abc,:"),
		Err(SliceError::InvalidSliceFormat(_))
	));
}

#[test]
fn test_from_nested_rejects_jagged() {
	assert!(Array2::from_nested(vec![vec![1, 2, 3], vec![4, 5]]).is_err());
	assert!(Array3::from_nested(vec![vec![vec![1], vec![2]], vec![vec![3, 4]]]).is_err());
	assert!(Array2::<i32>::from_nested(vec![]).is_ok());
}

#[test]
fn test_from_elem_and_zeros() {
	let array: Array3<i32> = Array::from_elem([2, 3, 4], 7);
	assert_eq!(array.shape(), &[2, 3, 4]);
	assert_eq!(array.size(), 24);
	assert!(array.iter().all(|value| *value == 7));
	let array: Array2<f32> = Array::zeros([4, 4]);
	assert_eq!(array.size(), 16);
	assert!(array.iter().all(|value| *value == 0.0));
}

#[test]
fn test_insert_axis() {
	let array = arr1(&[1, 2, 3]).insert_axis();
	assert_eq!(array.shape(), &[1, 3]);
	assert_eq!(array, arr2(&[[1, 2, 3]]));
	let array = array.insert_axis();
	assert_eq!(array.shape(), &[1, 1, 3]);
}
