use planeseg_core::{Colors, Normals, PointCloud};
use planeseg_io::{read_cloud, read_ply, write_cloud, write_obj, write_ply, CloudIoError};
use planeseg_segmentation::{extract_planes_seeded, RansacParams, PALETTE};
use tempfile::TempDir;

fn sample_cloud() -> PointCloud {
    PointCloud::from_points(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [-7.5, 0.25, 9.0]])
        .with_normals(Normals::from_vectors(&[
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ]))
        .with_colors(Colors::from_rgb(&[[255, 0, 0], [0, 128, 128], [128, 128, 128]]))
}

#[test]
fn obj_write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.obj");
    let cloud = sample_cloud();

    write_cloud(&path, &cloud).unwrap();
    let loaded = read_cloud(&path).unwrap();
    assert_eq!(loaded, cloud);
}

#[test]
fn ply_ascii_and_binary_agree() {
    let dir = TempDir::new().unwrap();
    let ascii = dir.path().join("ascii.ply");
    let binary = dir.path().join("binary.ply");
    let cloud = sample_cloud();

    write_ply(&ascii, &cloud).unwrap();
    write_cloud(&binary, &cloud).unwrap();

    assert_eq!(read_ply(&ascii).unwrap(), cloud);
    assert_eq!(read_cloud(&binary).unwrap(), cloud);
}

#[test]
fn empty_cloud_roundtrip() {
    let dir = TempDir::new().unwrap();
    for name in ["empty.obj", "empty.ply"] {
        let path = dir.path().join(name);
        write_cloud(&path, &PointCloud::new()).unwrap();
        assert!(read_cloud(&path).unwrap().is_empty());
    }
}

#[test]
fn obj_to_ply_conversion() {
    let dir = TempDir::new().unwrap();
    let obj = dir.path().join("scan.obj");
    let ply = dir.path().join("scan.ply");
    let cloud = sample_cloud();

    write_obj(&obj, &cloud).unwrap();
    write_cloud(&ply, &read_cloud(&obj).unwrap()).unwrap();
    assert_eq!(read_cloud(&ply).unwrap(), cloud);
}

#[test]
fn labeled_output_keeps_palette_colors() {
    let mut points = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            points.push([i as f32 * 0.25, j as f32 * 0.25, 0.0]);
            points.push([i as f32 * 0.25, 2.0, j as f32 * 0.25 + 0.5]);
        }
    }
    let cloud = PointCloud::from_points(&points);
    let params = RansacParams {
        distance_threshold: 0.01,
        ..RansacParams::default()
    };
    let extraction = extract_planes_seeded(&cloud, 2, &params, 31).unwrap();
    let labeled = extraction.to_labeled_cloud(&cloud);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("colored_planes.obj");
    write_cloud(&path, &labeled).unwrap();
    let loaded = read_cloud(&path).unwrap();

    assert_eq!(loaded.len(), 128);
    assert!(loaded.normals.is_none());
    let colors = loaded.colors.as_ref().unwrap();
    for i in 0..loaded.len() {
        let color = colors.get(i);
        assert!(color == PALETTE[0] || color == PALETTE[1], "unexpected color {:?}", color);
    }
}

#[test]
fn unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.pcd");
    assert!(matches!(
        write_cloud(&path, &sample_cloud()),
        Err(CloudIoError::UnknownFormat { .. })
    ));
    assert!(!path.exists());
}
