use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Attributes of one metadata group, in the order the backend reported them.
pub type MetadataGroup = IndexMap<String, Value>;

/// Metadata groups keyed by name. The `""` group holds global and
/// coordinate-variable attributes.
pub type Metadata = IndexMap<String, MetadataGroup>;

/// Name of the global metadata group.
pub const GLOBAL_GROUP: &str = "";

/// Descriptive snapshot of one raster file.
///
/// Member names follow `gdalinfo -json` so that its output can be read
/// directly. Optional members are `None` when the driver does not report them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterInfo {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<CoordinateSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_transform: Option<[f64; 6]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_coordinates: Option<CornerCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "wgs84Extent")]
    pub wgs84_extent: Option<Footprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Footprint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub wkt: String,
    #[serde(
        default,
        rename = "dataAxisToSRSAxisMapping",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_axis_to_srs_axis_mapping: Vec<i32>,
}

impl CoordinateSystem {
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: wkt.into(),
            data_axis_to_srs_axis_mapping: Vec::new(),
        }
    }
}

/// Georeferenced positions of the raster corners and center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerCoordinates {
    pub upper_left: [f64; 2],
    pub lower_left: [f64; 2],
    pub lower_right: [f64; 2],
    pub upper_right: [f64; 2],
    pub center: [f64; 2],
}

impl CornerCoordinates {
    /// Closed ring UL, LL, LR, UR, UL.
    pub fn ring(&self) -> Vec<[f64; 2]> {
        vec![
            self.upper_left,
            self.lower_left,
            self.lower_right,
            self.upper_right,
            self.upper_left,
        ]
    }
}

/// GeoJSON polygon describing the raster footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Footprint {
    pub fn polygon(ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "Polygon".into(),
            coordinates: vec![ring],
        }
    }
}

/// Top level [RasterInfo] members taking part in a comparison, in
/// comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    DriverShortName,
    Size,
    CoordinateSystem,
    GeoTransform,
    CornerCoordinates,
    Wgs84Extent,
    Extent,
}

impl InfoField {
    pub const ALL: [InfoField; 7] = [
        InfoField::DriverShortName,
        InfoField::Size,
        InfoField::CoordinateSystem,
        InfoField::GeoTransform,
        InfoField::CornerCoordinates,
        InfoField::Wgs84Extent,
        InfoField::Extent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InfoField::DriverShortName => "driverShortName",
            InfoField::Size => "size",
            InfoField::CoordinateSystem => "coordinateSystem",
            InfoField::GeoTransform => "geoTransform",
            InfoField::CornerCoordinates => "cornerCoordinates",
            InfoField::Wgs84Extent => "wgs84Extent",
            InfoField::Extent => "extent",
        }
    }

    /// Key of this field in a comparison result.
    pub fn match_key(&self) -> String {
        format!("{}_match", self.name())
    }
}

fn same<T: PartialEq>(lhs: &Option<T>, rhs: &Option<T>) -> bool {
    matches!((lhs, rhs), (Some(lhs), Some(rhs)) if lhs == rhs)
}

impl RasterInfo {
    pub fn has(&self, field: InfoField) -> bool {
        match field {
            InfoField::DriverShortName => self.driver_short_name.is_some(),
            InfoField::Size => self.size.is_some(),
            InfoField::CoordinateSystem => self.coordinate_system.is_some(),
            InfoField::GeoTransform => self.geo_transform.is_some(),
            InfoField::CornerCoordinates => self.corner_coordinates.is_some(),
            InfoField::Wgs84Extent => self.wgs84_extent.is_some(),
            InfoField::Extent => self.extent.is_some(),
        }
    }

    /// Allow-listed fields this info reports, in comparison order.
    pub fn present_fields(&self) -> impl Iterator<Item = InfoField> + '_ {
        InfoField::ALL.into_iter().filter(|field| self.has(*field))
    }

    /// `true` only if both infos report `field` with equal values.
    pub fn field_matches(&self, other: &RasterInfo, field: InfoField) -> bool {
        match field {
            InfoField::DriverShortName => same(&self.driver_short_name, &other.driver_short_name),
            InfoField::Size => same(&self.size, &other.size),
            InfoField::CoordinateSystem => same(&self.coordinate_system, &other.coordinate_system),
            InfoField::GeoTransform => same(&self.geo_transform, &other.geo_transform),
            InfoField::CornerCoordinates => {
                same(&self.corner_coordinates, &other.corner_coordinates)
            }
            InfoField::Wgs84Extent => same(&self.wgs84_extent, &other.wgs84_extent),
            InfoField::Extent => same(&self.extent, &other.extent),
        }
    }

    /// Attribute names of the global group. Empty when the group is missing.
    pub fn global_keys(&self) -> Vec<&str> {
        self.metadata
            .get(GLOBAL_GROUP)
            .map(|group| group.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GDALINFO_JSON: &str = r#"{
        "description": "tas_2015.tif",
        "driverShortName": "GTiff",
        "driverLongName": "GeoTIFF",
        "files": ["tas_2015.tif"],
        "size": [4, 3],
        "coordinateSystem": {
            "wkt": "PROJCRS[\"NAD83 / Alaska Albers\"]",
            "dataAxisToSRSAxisMapping": [1, 2]
        },
        "geoTransform": [-100.0, 10.0, 0.0, 200.0, 0.0, -10.0],
        "metadata": {
            "": {"AREA_OR_POINT": "Area", "units": "C"},
            "IMAGE_STRUCTURE": {"INTERLEAVE": "BAND"}
        },
        "cornerCoordinates": {
            "upperLeft": [-100.0, 200.0],
            "lowerLeft": [-100.0, 170.0],
            "lowerRight": [-60.0, 170.0],
            "upperRight": [-60.0, 200.0],
            "center": [-80.0, 185.0]
        },
        "bands": [{"band": 1, "type": "Float32"}]
    }"#;

    #[rstest]
    fn reads_gdalinfo_output() {
        let info: RasterInfo = serde_json::from_str(GDALINFO_JSON).unwrap();
        assert_eq!(info.driver_short_name.as_deref(), Some("GTiff"));
        assert_eq!(info.size, Some([4, 3]));
        assert_eq!(
            info.coordinate_system.as_ref().unwrap().data_axis_to_srs_axis_mapping,
            vec![1, 2]
        );
        assert_eq!(info.global_keys(), vec!["AREA_OR_POINT", "units"]);
        assert!(info.wgs84_extent.is_none());
        assert_eq!(
            info.present_fields().collect::<Vec<_>>(),
            vec![
                InfoField::DriverShortName,
                InfoField::Size,
                InfoField::CoordinateSystem,
                InfoField::GeoTransform,
                InfoField::CornerCoordinates,
            ]
        );
    }

    #[rstest]
    fn metadata_keeps_reported_order() {
        let info: RasterInfo =
            serde_json::from_str(r#"{"metadata": {"": {"b": "1", "a": "2"}}}"#).unwrap();
        assert_eq!(info.global_keys(), vec!["b", "a"]);
    }

    #[rstest]
    fn missing_global_group_has_no_keys() {
        assert!(RasterInfo::default().global_keys().is_empty());
    }

    #[rstest]
    #[case(InfoField::DriverShortName, "driverShortName_match")]
    #[case(InfoField::Wgs84Extent, "wgs84Extent_match")]
    #[case(InfoField::Extent, "extent_match")]
    fn match_keys(#[case] field: InfoField, #[case] key: &str) {
        assert_eq!(field.match_key(), key);
    }

    #[rstest]
    fn absent_field_never_matches() {
        let reference = RasterInfo {
            size: Some([2, 2]),
            ..Default::default()
        };
        let check = RasterInfo::default();
        assert!(!check.field_matches(&reference, InfoField::Size));
        assert!(!check.field_matches(&check, InfoField::Size));
        assert!(reference.field_matches(&reference, InfoField::Size));
    }

    #[rstest]
    fn exported_snapshot_omits_absent_fields() {
        let info = RasterInfo {
            driver_short_name: Some("netCDF".into()),
            wgs84_extent: Some(Footprint::polygon(vec![[0., 0.], [0., 1.], [0., 0.]])),
            ..Default::default()
        };
        let json: Value = serde_json::from_str(&info.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["driverShortName"], "netCDF");
        assert_eq!(json["wgs84Extent"]["type"], "Polygon");
        assert!(json.get("size").is_none());
    }
}
