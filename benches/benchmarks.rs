use criterion::{criterion_group, criterion_main, Criterion};
use raster_qaqc::{compare_info, CompareOptions, RasterInfo};
use std::hint::black_box;

fn netcdf_info() -> RasterInfo {
    serde_json::from_value(serde_json::json!({
        "driverShortName": "netCDF",
        "size": [2048, 2048],
        "coordinateSystem": {"wkt": "PROJCRS[\"NAD83 / Alaska Albers\"]"},
        "geoTransform": [-2173223.0, 2000.0, 0.0, 2548412.0, 0.0, -2000.0],
        "metadata": {
            "": {
                "NC_GLOBAL#title": "tas",
                "NC_GLOBAL#Conventions": "CF-1.8",
                "spatial_ref#crs_wkt": "PROJCRS[\"NAD83 / Alaska Albers\"]"
            },
            "spatial_ref": {"grid_mapping_name": "albers_conical_equal_area"},
            "SUBDATASETS": {"SUBDATASET_1_NAME": "NETCDF:\"tas.nc\":tas"}
        }
    }))
    .unwrap()
}

fn bench_compare_info(c: &mut Criterion) {
    let reference = netcdf_info();
    let check = netcdf_info();
    let options = CompareOptions::default().with_crs_variable("spatial_ref");
    c.bench_function("compare_info", |b| {
        b.iter(|| compare_info(black_box(&check), black_box(&reference), &options))
    });
}

criterion_group!(benches, bench_compare_info);
criterion_main!(benches);
