/// Colors assigned to extracted planes, cycled by plane index.
pub const PALETTE: [[u8; 3]; 10] = [
    [255, 0, 0],     // red
    [0, 255, 0],     // green
    [0, 0, 255],     // blue
    [255, 255, 0],   // yellow
    [255, 0, 255],   // magenta
    [0, 255, 255],   // cyan
    [128, 0, 0],     // dark red
    [128, 128, 128], // gray
    [255, 128, 0],   // orange
    [0, 128, 128],   // dark cyan
];

pub fn plane_color(plane_index: usize) -> [u8; 3] {
    PALETTE[plane_index % PALETTE.len()]
}
