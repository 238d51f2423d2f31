macro_rules! c_enum {
    (
        $(#[$enum_meta:meta])*
        $vis:vis enum $EnumName:ident: $Primitive:ident {
            $(
                $(#[$variant_meta:meta])*
                $Variant:ident $(= $Value:expr)?
            ),*
            $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[repr($Primitive)]
        $vis enum $EnumName {
            $(
                $(#[$variant_meta])*
                $Variant $(= $Value)?
            ),*
        }

        impl $EnumName {
            /// Converts this enum to its primitive value.
            #[allow(dead_code)]
            pub(crate) fn to_primitive(self) -> $Primitive {
                self as $Primitive
            }

            /// Converts a primitive value to this enum.
            #[allow(dead_code)]
            pub(crate) fn from_primitive(primitive: $Primitive) -> Option<Self> {
                match primitive {
                    $( _ if primitive == Self::$Variant as $Primitive => Some(Self::$Variant) ,)*
                    _ => None,
                }
            }

            /// Converts this to its C value.
            #[allow(dead_code)]
            pub(crate) fn to_c(self) -> libc::c_int {
                self as $Primitive as libc::c_int
            }

            /// Converts from a C value into this.
            #[allow(dead_code)]
            pub(crate) fn from_c(c: libc::c_int) -> Option<Self> {
                if let Ok(v) = <libc::c_int as core::convert::TryInto<$Primitive>>::try_into(c) {
                    Self::from_primitive(v)
                } else {
                    None
                }
            }
        }
    };
}

/// Describes a single field (or a member of an anonymous union) of a `#[repr(C)]`
/// type. This is evaluated at compile time without ever reading the field.
macro_rules! field_layout {
    ($Type:ty, $name:literal, $($field:ident).+) => {{
        let uninit = core::mem::MaybeUninit::<$Type>::uninit();
        let base = uninit.as_ptr();
        #[allow(unused_unsafe)]
        let field = unsafe { core::ptr::addr_of!((*base)$(.$field)+) };
        $crate::layout::FieldLayout {
            name: $name,
            offset: unsafe { (field as *const u8).offset_from(base as *const u8) } as usize,
            size: $crate::layout::size_of_pointee(field),
        }
    }};
}

macro_rules! struct_layout {
    (
        $Type:ty as $c_name:literal {
            $( $c_field:literal => $($field:ident).+ ),*
            $(,)?
        }
    ) => {
        $crate::layout::StructLayout {
            name: $c_name,
            size: core::mem::size_of::<$Type>(),
            align: core::mem::align_of::<$Type>(),
            fields: &[ $( field_layout!($Type, $c_field, $($field).+) ),* ],
        }
    };
}
