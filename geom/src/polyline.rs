use crate::{CoordError, Distance, LonLat};

/// The great-circle length of a path visiting each point in order. Paths with fewer than 2
/// points have no length. A closed ring (first point repeated at the end) includes its closing
/// segment, since that segment is part of the sequence.
pub fn path_length(pts: &[LonLat]) -> Distance {
    pts.windows(2)
        .map(|pair| pair[0].gps_dist_meters(pair[1]))
        .sum()
}

/// Like `path_length`, but takes raw GeoJSON positions and validates every one before measuring
/// anything.
pub fn try_path_length<P: AsRef<[f64]>>(positions: &[P]) -> Result<Distance, CoordError> {
    let pts = positions
        .iter()
        .map(|pos| LonLat::from_position(pos.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(path_length(&pts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_paths() {
        assert_eq!(path_length(&[]), Distance::ZERO);
        assert_eq!(path_length(&[LonLat::new(5.0, 5.0)]), Distance::ZERO);
        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(try_path_length(&empty), Ok(Distance::ZERO));
    }

    #[test]
    fn closed_loop_is_sum_of_segments() {
        let ring = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 0.0),
        ];
        let segments: Distance = ring
            .windows(2)
            .map(|pair| pair[0].gps_dist_meters(pair[1]))
            .sum();
        assert_eq!(path_length(&ring), segments);
        // No shortcut: the closing segment really is counted
        assert!(path_length(&ring) > path_length(&ring[0..3]));
    }

    #[test]
    fn altitude_is_ignored() {
        let flat = try_path_length(&[vec![0.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let hilly = try_path_length(&[vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 4000.0]]).unwrap();
        assert_eq!(flat, hilly);
        assert_eq!(flat.round_km(), 111.19);
    }

    #[test]
    fn bad_position_fails_the_whole_path() {
        assert_eq!(
            try_path_length(&[vec![0.0, 0.0], vec![0.0, 95.0], vec![0.0, 1.0]]),
            Err(CoordError::InvalidLatitude(95.0))
        );
    }
}
