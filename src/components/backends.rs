use std::path::{Path, PathBuf};

use crate::{
    components::{
        file::File,
        info::{CoordinateSystem, CornerCoordinates, Footprint, Metadata, RasterInfo},
    },
    errors::Result,
};

/// Implementations for gdal
pub mod gdal_backend {
    use super::*;
    use gdal::{
        spatial_ref::{CoordTransform, SpatialRef},
        Dataset as GdalDataset, Metadata as GdalMetadata, MetadataEntry as GdalMetadataEntry,
    };
    use geo::{AffineTransform, Coord};
    use log::debug;
    use serde_json::Value;

    const WGS84_EPSG: u32 = 4326;

    fn affine_from_gdal(gdal_transform: [f64; 6]) -> AffineTransform {
        AffineTransform::new(
            gdal_transform[1],
            gdal_transform[2],
            gdal_transform[0],
            gdal_transform[4],
            gdal_transform[5],
            gdal_transform[3],
        )
    }

    /// Group metadata items by domain, keeping gdal's domain and item order.
    fn group_metadata_gdal(metadata: &impl GdalMetadata) -> Metadata {
        GdalMetadata::metadata(metadata).fold(
            Metadata::new(),
            |mut groups, GdalMetadataEntry { domain, key, value }| {
                groups
                    .entry(domain)
                    .or_default()
                    .insert(key, Value::String(value));
                groups
            },
        )
    }

    fn corner_coordinates(transform: &AffineTransform, size: (usize, usize)) -> CornerCoordinates {
        let (width, height) = (size.0 as f64, size.1 as f64);
        let corner = |x: f64, y: f64| {
            let coord = transform.apply(Coord { x, y });
            [coord.x, coord.y]
        };
        CornerCoordinates {
            upper_left: corner(0., 0.),
            lower_left: corner(0., height),
            lower_right: corner(width, height),
            upper_right: corner(width, 0.),
            center: corner(width / 2., height / 2.),
        }
    }

    fn wgs84_footprint(spatial_ref: &SpatialRef, corners: &CornerCoordinates) -> Result<Footprint> {
        let wgs84 = SpatialRef::from_epsg(WGS84_EPSG)?;
        let transform = CoordTransform::new(spatial_ref, &wgs84)?;
        let ring = corners.ring();
        let mut xs: Vec<f64> = ring.iter().map(|coord| coord[0]).collect();
        let mut ys: Vec<f64> = ring.iter().map(|coord| coord[1]).collect();
        let mut zs: [f64; 0] = [];
        transform.transform_coords(&mut xs, &mut ys, &mut zs)?;
        // EPSG:4326 yields lat, lon
        Ok(Footprint::polygon(
            xs.into_iter().zip(ys).map(|(lat, lon)| [lon, lat]).collect(),
        ))
    }

    #[derive(Debug)]
    pub struct GdalFile {
        path: PathBuf,
        dataset: GdalDataset,
    }

    impl GdalFile {
        pub fn driver_short_name(&self) -> String {
            self.dataset.driver().short_name()
        }

        pub fn size(&self) -> (usize, usize) {
            self.dataset.raster_size()
        }

        pub fn spatial_ref(&self) -> Option<SpatialRef> {
            self.dataset.spatial_ref().ok()
        }

        pub fn geo_transform(&self) -> Option<[f64; 6]> {
            self.dataset.geo_transform().ok()
        }

        pub fn metadata(&self) -> Metadata {
            group_metadata_gdal(&self.dataset)
        }
    }

    impl File for GdalFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Ok(GdalFile {
                path: path.as_ref().to_path_buf(),
                dataset: GdalDataset::open(&path)?,
            })
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn info(&self) -> Result<RasterInfo> {
            let size = self.size();
            let spatial_ref = self.spatial_ref();
            let coordinate_system = spatial_ref
                .as_ref()
                .map(SpatialRef::to_wkt)
                .transpose()?
                .map(CoordinateSystem::from_wkt);
            let geo_transform = self.geo_transform();
            let corner_coordinates =
                geo_transform.map(|transform| corner_coordinates(&affine_from_gdal(transform), size));
            let wgs84_extent = match (&spatial_ref, &corner_coordinates) {
                (Some(spatial_ref), Some(corners)) => wgs84_footprint(spatial_ref, corners)
                    .inspect_err(|err| {
                        debug!("{}: no wgs84 extent, {err}", self.path.display())
                    })
                    .ok(),
                _ => None,
            };
            let extent = corner_coordinates
                .as_ref()
                .map(|corners| Footprint::polygon(corners.ring()));

            let info = RasterInfo {
                metadata: self.metadata(),
                driver_short_name: Some(self.driver_short_name()),
                size: Some([size.0, size.1]),
                coordinate_system,
                geo_transform,
                corner_coordinates,
                wgs84_extent,
                extent,
            };
            debug!(
                "{}: {} fields, {} metadata groups",
                self.path.display(),
                info.present_fields().count(),
                info.metadata.len()
            );
            Ok(info)
        }
    }

}

/// Info documents exported earlier, e.g. with `gdalinfo -json`.
pub mod json_backend {
    use super::*;
    use std::{fs, io::BufReader};

    #[derive(Debug)]
    pub struct JsonFile {
        path: PathBuf,
        info: RasterInfo,
    }

    impl File for JsonFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let reader = BufReader::new(fs::File::open(&path)?);
            Ok(JsonFile {
                path: path.as_ref().to_path_buf(),
                info: serde_json::from_reader(reader)?,
            })
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn info(&self) -> Result<RasterInfo> {
            Ok(self.info.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::errors::QaqcError;
        use rstest::rstest;

        #[rstest]
        fn reads_exported_snapshot() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("snapshot.json");
            let info = RasterInfo {
                driver_short_name: Some("netCDF".into()),
                size: Some([10, 20]),
                ..Default::default()
            };
            fs::write(&path, info.to_json_pretty().unwrap()).unwrap();

            let file = JsonFile::open(&path).unwrap();
            assert_eq!(file.path(), path.as_path());
            assert_eq!(file.info().unwrap(), info);
        }

        #[rstest]
        fn malformed_document_is_a_json_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("broken.json");
            fs::write(&path, "{ not json").unwrap();
            assert!(matches!(
                JsonFile::open(&path),
                Err(QaqcError::JsonError(_))
            ));
        }

        #[rstest]
        fn missing_document_is_an_io_error() {
            assert!(matches!(
                JsonFile::open("does/not/exist.json"),
                Err(QaqcError::IoError(_))
            ));
        }
    }
}
