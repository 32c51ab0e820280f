use crate::{
    entities::{Bounds, GeoPoint},
    error::{empty_point_set_error, Error},
};

/// Smallest rectangle enclosing every point. Sentinel points are included
/// like any other.
pub fn bounds_of(points: &[GeoPoint]) -> Result<Bounds, Error> {
    let (first, rest) = points.split_first().ok_or_else(empty_point_set_error)?;

    let initial = Bounds {
        north: first.lat,
        south: first.lat,
        east: first.lng,
        west: first.lng,
    };

    Ok(rest.iter().fold(initial, |b, p| Bounds {
        north: b.north.max(p.lat),
        south: b.south.min(p.lat),
        east: b.east.max(p.lng),
        west: b.west.min(p.lng),
    }))
}

#[test]
fn bounds_enclose_every_point() {
    let points = vec![
        GeoPoint::new(3.139, 101.687, "Kuala Lumpur".into()),
        GeoPoint::new(4.597, 101.090, "Ipoh".into()),
        GeoPoint::new(5.414, 100.329, "George Town".into()),
        GeoPoint::new(-33.87, 151.21, "Sydney".into()),
    ];

    let bounds = bounds_of(&points).unwrap();

    assert!(bounds.north >= bounds.south);
    assert!(bounds.east >= bounds.west);
    for p in &points {
        assert!(bounds.contains(p), "{:?} outside {:?}", p, bounds);
    }
    assert_eq!(bounds.north, 5.414);
    assert_eq!(bounds.south, -33.87);
    assert_eq!(bounds.east, 151.21);
    assert_eq!(bounds.west, 100.329);
}

#[test]
fn single_point_collapses_to_that_point() {
    let bounds = bounds_of(&[GeoPoint::new(35.68, 139.69, "Tokyo".into())]).unwrap();
    let rect: geo_types::Rect<f64> = bounds.into();

    assert_eq!(rect.min().x, 139.69);
    assert_eq!(rect.max().y, 35.68);
}

#[test]
fn empty_point_set_is_rejected() {
    assert_eq!(bounds_of(&[]).unwrap_err().code, 6);
}
