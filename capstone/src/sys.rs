extern "C" {
    fn ep_helper__get_value(name: *const libc::c_char, len: libc::size_t) -> libc::size_t;
}

/// Returned by the helper for names it does not know.
const UNKNOWN_VALUE: libc::size_t = libc::size_t::MAX;

pub fn get_value(name: &str) -> Option<usize> {
    let value = unsafe {
        ep_helper__get_value(
            name.as_ptr() as *const libc::c_char,
            name.len() as libc::size_t,
        )
    };

    if value == UNKNOWN_VALUE {
        None
    } else {
        Some(value as usize)
    }
}

#[cfg(test)]
pub fn get_test_val(name: &str) -> usize {
    match get_value(name) {
        Some(value) => value,
        None => panic!("the layout helper has no value for `{}`", name),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_names_have_no_value() {
        assert_eq!(get_value("sizeof(cs_x86)"), None);
        assert_eq!(get_value(""), None);
        assert_eq!(get_value("sizeof(sysz_op_mem"), None);
    }

    #[cfg(feature = "systemz")]
    #[test]
    fn names_must_match_exactly() {
        assert!(get_value("sizeof(sysz_op_mem)").is_some());
        assert_eq!(get_value("sizeof(sysz_op_mem) "), None);
        assert_eq!(get_value("SIZEOF(sysz_op_mem)"), None);
    }
}
