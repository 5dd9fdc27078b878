/*!
This crate provides a basic implementation of ndarrays, which are *n*-dimensional arrays of elements of the same data type. An array is a plain owned value with a compile-time number of axes and a rectangular shape. Indexing with [`at`](struct.Array.html#method.at) resolves negative indices against the axis length the way Python does, and [`slice`](struct.Array.html#method.slice) accepts NumPy-style slice strings like `"1:5:2,:"` and returns a new, independently owned array. There are no views: every copy, including every slice result, has its own storage.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod array;
mod dim;
mod fmt;
mod range;

pub use self::array::{
	arr1, arr2, arr3, Array, Array1, Array2, Array3, Array4, Array5, Array6, ArrayIndex,
	ArrayIndexMut, IndexOutOfRangeError, JaggedLiteralError, SliceError, TooManySlicesError,
};
pub use self::dim::{
	Dim, Dimension, InsertAxis, IntoDimension, Ix1, Ix2, Ix3, Ix4, Ix5, Ix6, RemoveAxis,
};
pub use self::range::{InvalidSliceFormatError, Range};
