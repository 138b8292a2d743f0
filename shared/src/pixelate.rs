pub const DEFAULT_PIXEL_SIZE: u32 = 30;

/// Pixelates an RGBA8 buffer in place: every `block` x `block` cell is
/// filled with the average of its pixels. Edge cells are clipped to the
/// buffer. Returns `false` without touching the buffer if its length does
/// not match `width * height * 4`.
pub fn pixelate(rgba: &mut [u8], width: u32, height: u32, block: u32) -> bool {
    let width = width as usize;
    let height = height as usize;
    if rgba.len() != width * height * 4 {
        return false;
    }
    let block = block.max(1) as usize;
    if block == 1 {
        return true;
    }
    for cell_y in (0..height).step_by(block) {
        let y_end = (cell_y + block).min(height);
        for cell_x in (0..width).step_by(block) {
            let x_end = (cell_x + block).min(width);
            let mut sum = [0u64; 4];
            for y in cell_y..y_end {
                let row = y * width;
                for x in cell_x..x_end {
                    let offset = (row + x) * 4;
                    for channel in 0..4 {
                        sum[channel] += u64::from(rgba[offset + channel]);
                    }
                }
            }
            let count = ((y_end - cell_y) * (x_end - cell_x)) as u64;
            let average = sum.map(|total| ((total + count / 2) / count) as u8);
            for y in cell_y..y_end {
                let row = y * width;
                for x in cell_x..x_end {
                    let offset = (row + x) * 4;
                    rgba[offset..offset + 4].copy_from_slice(&average);
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * width + x) * 4;
        [
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]
    }

    #[test]
    fn blocks_take_their_average_color() {
        // 2x2 block: two black and two white pixels.
        let mut buffer = vec![
            0, 0, 0, 255, 255, 255, 255, 255, //
            255, 255, 255, 255, 0, 0, 0, 255,
        ];
        assert!(pixelate(&mut buffer, 2, 2, 2));
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(pixel(&buffer, 2, x, y), [128, 128, 128, 255]);
        }
    }

    #[test]
    fn edge_blocks_are_clipped() {
        let mut buffer = Vec::new();
        for x in 0..3u8 {
            buffer.extend_from_slice(&[x * 10, 0, 0, 255]);
        }
        assert!(pixelate(&mut buffer, 3, 1, 2));
        assert_eq!(pixel(&buffer, 3, 0, 0), [5, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 3, 1, 0), [5, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 3, 2, 0), [20, 0, 0, 255]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let mut buffer = vec![0u8; 10];
        assert!(!pixelate(&mut buffer, 2, 2, 2));
    }
}
