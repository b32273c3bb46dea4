/// Policy for pixel coordinates that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Replace the coordinate with the nearest valid index.
    #[default]
    Clamp,
    /// Drop the sample.
    Skip,
}

pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Skip => {
            if i < 0 || i >= len as isize {
                None
            } else {
                Some(i as usize)
            }
        }
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                let idx = i as usize;
                Some(idx.min(len - 1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn clamp_mapping_handles_negative_and_overflow() {
        let mode = BorderMode::Clamp;

        assert_eq!(map_index(-3, 5, mode), Some(0));
        assert_eq!(map_index(-1, 5, mode), Some(0));
        assert_eq!(map_index(0, 5, mode), Some(0));
        assert_eq!(map_index(4, 5, mode), Some(4));
        assert_eq!(map_index(5, 5, mode), Some(4));
        assert_eq!(map_index(99, 5, mode), Some(4));
    }

    #[test]
    fn skip_mapping_drops_outside_indices() {
        let mode = BorderMode::Skip;

        assert_eq!(map_index(-1, 5, mode), None);
        assert_eq!(map_index(0, 5, mode), Some(0));
        assert_eq!(map_index(4, 5, mode), Some(4));
        assert_eq!(map_index(5, 5, mode), None);
    }

    #[test]
    fn empty_axis_never_maps() {
        assert_eq!(map_index(0, 0, BorderMode::Clamp), None);
        assert_eq!(map_index(0, 0, BorderMode::Skip), None);
    }
}
