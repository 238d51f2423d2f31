//! Compile time descriptions of the memory layout of the `#[repr(C)]` types
//! in this crate, named after their C counterparts.

/// The offset and size of a single field. Members of an anonymous union are
/// described as fields of the enclosing struct, the way C's `offsetof` sees them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

impl FieldLayout {
    /// The offset of the first byte after this field.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: &'static [FieldLayout],
}

impl StructLayout {
    /// Returns the layout of the field with the given C name.
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[doc(hidden)]
pub const fn size_of_pointee<T>(_ptr: *const T) -> usize {
    core::mem::size_of::<T>()
}
