use crate::{latlon::LatLon, constants::{WGS84_A, WGS84_E2, UTM_K0}};

/// WGS84 Transverse Mercator series in the form used by the usng/proj4
/// family of converters: real-valued expansions in the eccentricity, with
/// the inverse going through the footpoint latitude. Sub-meter within the
/// UTM band.
pub(crate) struct TransverseMercator {
    a: f64,
    e2: f64,
    // Second eccentricity squared, e'^2 = e^2 / (1 - e^2)
    ep2: f64,
    // Series constant for the footpoint latitude
    e1: f64,
    k0: f64,
}

#[allow(clippy::similar_names, clippy::many_single_char_names)]
impl TransverseMercator {
    pub(crate) fn utm() -> TransverseMercator {
        let e1 = (1. - (1. - WGS84_E2).sqrt()) / (1. + (1. - WGS84_E2).sqrt());

        Self {
            a: WGS84_A,
            e2: WGS84_E2,
            ep2: WGS84_E2 / (1. - WGS84_E2),
            e1,
            k0: UTM_K0,
        }
    }

    /// Forward projection. Returns (x, y) relative to the central meridian
    /// `lon0` and the equator; the caller applies the false origins.
    pub(crate) fn from_latlon(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
        let lat_rad = lat.to_radians();
        let lon_rad = lon.to_radians();
        let lon0_rad = lon0.to_radians();

        let n = self.a / (1. - self.e2 * lat_rad.sin().powi(2)).sqrt();
        let t = lat_rad.tan().powi(2);
        let c = self.ep2 * lat_rad.cos().powi(2);
        let a = lat_rad.cos() * (lon_rad - lon0_rad);

        let m = self.meridional_arc(lat_rad);

        let x = self.k0 * n * (a
            + (1. - t + c) * a.powi(3) / 6.
            + (5. - 18. * t + t.powi(2) + 72. * c - 58. * self.ep2) * a.powi(5) / 120.);

        let y = self.k0 * (m + n * lat_rad.tan() * (a.powi(2) / 2.
            + (5. - t + 9. * c + 4. * c.powi(2)) * a.powi(4) / 24.
            + (61. - 58. * t + t.powi(2) + 600. * c - 330. * self.ep2) * a.powi(6) / 720.));

        (x, y)
    }

    /// Inverse projection. (x, y) must already have the false origins
    /// stripped; the hemisphere is the caller's concern.
    pub(crate) fn to_latlon(&self, lon0: f64, x: f64, y: f64) -> LatLon {
        let phi1 = self.footpoint_latitude(y / self.k0);

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();

        let n1 = self.a / (1. - self.e2 * sin_phi1.powi(2)).sqrt();
        let t1 = phi1.tan().powi(2);
        let c1 = self.ep2 * cos_phi1.powi(2);
        let r1 = self.a * (1. - self.e2) / (1. - self.e2 * sin_phi1.powi(2)).powf(1.5);
        let d = x / (n1 * self.k0);

        let lat = phi1 - (n1 * phi1.tan() / r1) * (d.powi(2) / 2.
            - (5. + 3. * t1 + 10. * c1 - 4. * c1.powi(2) - 9. * self.ep2) * d.powi(4) / 24.
            + (61. + 90. * t1 + 298. * c1 + 45. * t1.powi(2) - 252. * self.ep2 - 3. * c1.powi(2)) * d.powi(6) / 720.);

        let lon = (d - (1. + 2. * t1 + c1) * d.powi(3) / 6.
            + (5. - 2. * c1 + 28. * t1 - 3. * c1.powi(2) + 8. * self.ep2 + 24. * t1.powi(2)) * d.powi(5) / 120.)
            / cos_phi1;

        LatLon::new(lat.to_degrees(), lon0 + lon.to_degrees())
    }

    // Meridional arc length from the equator to lat_rad.
    fn meridional_arc(&self, lat_rad: f64) -> f64 {
        let e2 = self.e2;

        self.a * ((1. - e2 / 4. - 3. * e2.powi(2) / 64. - 5. * e2.powi(3) / 256.) * lat_rad
            - (3. * e2 / 8. + 3. * e2.powi(2) / 32. + 45. * e2.powi(3) / 1024.) * (2. * lat_rad).sin()
            + (15. * e2.powi(2) / 256. + 45. * e2.powi(3) / 1024.) * (4. * lat_rad).sin()
            - (35. * e2.powi(3) / 3072.) * (6. * lat_rad).sin())
    }

    // Footpoint latitude for a meridional arc length m: the convergent
    // trigonometric series, not iterative root-finding.
    fn footpoint_latitude(&self, m: f64) -> f64 {
        let e2 = self.e2;
        let e1 = self.e1;

        let mu = m / (self.a * (1. - e2 / 4. - 3. * e2.powi(2) / 64. - 5. * e2.powi(3) / 256.));

        mu + (3. * e1 / 2. - 27. * e1.powi(3) / 32.) * (2. * mu).sin()
            + (21. * e1.powi(2) / 16. - 55. * e1.powi(4) / 32.) * (4. * mu).sin()
            + (151. * e1.powi(3) / 96.) * (6. * mu).sin()
    }
}
