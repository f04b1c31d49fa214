//! NETPBM (PGM/PPM) driver
//!
//! Reads plain (P2/P3) and raw (P5/P6) gray and color maps with any maxval up
//! to 65535. Writes raw P5/P6: magic, `width height` and `maxval` on their own
//! lines, then row-major samples, one byte each below maxval 256, otherwise two
//! bytes big-endian.

use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};

use crate::channel::ChannelKind;
use crate::errors::{GeoError, GeoResult};
use crate::pixel::{PixelShape, RawPixel};

use super::grid::{sample_count, SampleGrid};
use super::handler::{DriverHeader, ImageDriver};

const EXTENSIONS: &[&str] = &["pgm", "ppm", "pnm"];

/// Driver for the NETPBM gray (PGM) and color (PPM) formats
#[derive(Debug, Default)]
pub struct NetpbmDriver {
    grid: Option<SampleGrid>,
}

impl NetpbmDriver {
    pub fn new() -> Self {
        NetpbmDriver { grid: None }
    }

    fn grid(&self) -> GeoResult<&SampleGrid> {
        self.grid
            .as_ref()
            .ok_or_else(|| GeoError::Uninitialized("NETPBM driver has no image open".to_string()))
    }

    /// Decode a complete PGM/PPM byte stream
    pub fn decode(data: &[u8]) -> GeoResult<(DriverHeader, Vec<f64>)> {
        let mut pos = 0;
        let magic = next_token(data, &mut pos)?;
        let (shape, binary) = match magic.as_str() {
            "P2" => (PixelShape::Gray, false),
            "P3" => (PixelShape::Rgb, false),
            "P5" => (PixelShape::Gray, true),
            "P6" => (PixelShape::Rgb, true),
            other => {
                return Err(GeoError::ParseError(format!("Unsupported NETPBM magic: {}", other)))
            }
        };

        let cols = parse_header_number(&next_token(data, &mut pos)?, "width")?;
        let rows = parse_header_number(&next_token(data, &mut pos)?, "height")?;
        let maxval = parse_header_number(&next_token(data, &mut pos)?, "maxval")?;
        if maxval == 0 || maxval > 65535 {
            return Err(GeoError::ParseError(format!("Invalid NETPBM maxval: {}", maxval)));
        }

        let kind = ChannelKind::for_max_sample(maxval as u32);
        let header = DriverHeader::new(rows, cols, shape, kind);
        let count = sample_count(&header)?;
        debug!("NETPBM {} {}x{} maxval {} ({})", magic, cols, rows, maxval, kind);

        let raw_samples = if binary {
            // Exactly one whitespace byte separates maxval from the raster
            read_binary_samples(&data[(pos + 1).min(data.len())..], count, maxval)?
        } else {
            read_ascii_samples(data, &mut pos, count)?
        };

        let scale = kind.max_value() / maxval as f64;
        let samples = raw_samples
            .into_iter()
            .map(|s| if maxval as f64 == kind.max_value() { s } else { kind.quantize(s * scale) })
            .collect();

        Ok((header, samples))
    }

    /// Encode samples as raw P5/P6
    pub fn encode(header: &DriverHeader, samples: &[f64]) -> GeoResult<Vec<u8>> {
        let magic = match header.shape {
            PixelShape::Gray => "P5",
            PixelShape::Rgb => "P6",
            PixelShape::Rgba => {
                return Err(GeoError::NotSupported("NETPBM cannot store an alpha channel".to_string()))
            }
        };
        let maxval = header.kind.max_value();
        if !header.kind.is_integer() || maxval > 65535.0 {
            return Err(GeoError::NotSupported(format!("NETPBM samples of kind {}", header.kind)));
        }

        let mut out = Vec::with_capacity(samples.len() * 2 + 32);
        write!(out, "{}\n{} {}\n{}\n", magic, header.cols, header.rows, maxval as u32)?;
        for sample in samples {
            if maxval < 256.0 {
                out.push(*sample as u8);
            } else {
                out.write_u16::<BigEndian>(*sample as u16)?;
            }
        }
        Ok(out)
    }
}

impl ImageDriver for NetpbmDriver {
    fn name(&self) -> &'static str {
        "NETPBM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn probe(&self, path: &Path) -> bool {
        let mut magic = [0u8; 2];
        match File::open(path).and_then(|mut f| f.read_exact(&mut magic)) {
            Ok(()) => magic[0] == b'P' && matches!(magic[1], b'2' | b'3' | b'5' | b'6'),
            Err(_) => false,
        }
    }

    fn open(&mut self, path: &Path) -> GeoResult<DriverHeader> {
        let data = fs::read(path)?;
        let (header, samples) = Self::decode(&data)?;
        self.grid = Some(SampleGrid::from_samples(header, samples)?);
        info!("Opened {} as NETPBM {}x{} {}", path.display(), header.cols, header.rows, header.shape);
        Ok(header)
    }

    fn create(&mut self, header: DriverHeader) -> GeoResult<()> {
        let (shape, kind) = self.output_format(header.shape, header.kind);
        self.grid = Some(SampleGrid::new(DriverHeader::new(header.rows, header.cols, shape, kind))?);
        Ok(())
    }

    fn header(&self) -> Option<DriverHeader> {
        self.grid.as_ref().map(|g| g.header)
    }

    fn output_format(&self, shape: PixelShape, kind: ChannelKind) -> (PixelShape, ChannelKind) {
        let shape = match shape {
            PixelShape::Gray => PixelShape::Gray,
            PixelShape::Rgb | PixelShape::Rgba => PixelShape::Rgb,
        };
        let kind = match kind {
            ChannelKind::UInt8 | ChannelKind::UInt12 | ChannelKind::UInt14 | ChannelKind::UInt16 => kind,
            ChannelKind::UInt32 => ChannelKind::UInt16,
            ChannelKind::Float01 | ChannelKind::FloatFree => ChannelKind::UInt8,
        };
        (shape, kind)
    }

    fn read_pixel(&self, row: usize, col: usize) -> GeoResult<RawPixel> {
        self.grid()?.get(row, col)
    }

    fn write_pixel(&mut self, row: usize, col: usize, pixel: &RawPixel) -> GeoResult<()> {
        match self.grid.as_mut() {
            Some(grid) => grid.set(row, col, pixel),
            None => Err(GeoError::Uninitialized("NETPBM driver has no image open".to_string())),
        }
    }

    fn write(&self, path: &Path) -> GeoResult<()> {
        let grid = self.grid()?;
        let bytes = Self::encode(&grid.header, grid.samples())?;
        fs::write(path, bytes)?;
        info!("Wrote NETPBM image to {}", path.display());
        Ok(())
    }
}

/// Read the next header token, skipping whitespace and `#` comments
fn next_token(data: &[u8], pos: &mut usize) -> GeoResult<String> {
    while *pos < data.len() {
        let byte = data[*pos];
        if byte == b'#' {
            while *pos < data.len() && data[*pos] != b'\n' {
                *pos += 1;
            }
        } else if byte.is_ascii_whitespace() {
            *pos += 1;
        } else {
            break;
        }
    }

    let start = *pos;
    while *pos < data.len() && !data[*pos].is_ascii_whitespace() {
        *pos += 1;
    }

    if start == *pos {
        return Err(GeoError::ParseError("Unexpected end of NETPBM data".to_string()));
    }
    Ok(String::from_utf8_lossy(&data[start..*pos]).into_owned())
}

fn parse_header_number(token: &str, field: &str) -> GeoResult<usize> {
    token
        .parse::<usize>()
        .map_err(|_| GeoError::ParseError(format!("Invalid NETPBM {}: {}", field, token)))
}

fn read_binary_samples(body: &[u8], count: usize, maxval: usize) -> GeoResult<Vec<f64>> {
    let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
    let needed = count
        .checked_mul(bytes_per_sample)
        .ok_or_else(|| GeoError::ParseError(format!("NETPBM raster of {} samples is too large", count)))?;
    if body.len() < needed {
        return Err(GeoError::ParseError(format!(
            "NETPBM raster truncated: need {} bytes, found {}",
            needed,
            body.len()
        )));
    }

    let mut cursor = Cursor::new(body);
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let sample = if bytes_per_sample == 1 {
            cursor.read_u8()? as f64
        } else {
            cursor.read_u16::<BigEndian>()? as f64
        };
        samples.push(sample);
    }
    Ok(samples)
}

fn read_ascii_samples(data: &[u8], pos: &mut usize, count: usize) -> GeoResult<Vec<f64>> {
    // Every plain sample takes at least one byte
    let remaining = data.len().saturating_sub(*pos);
    if count > remaining {
        return Err(GeoError::ParseError(format!(
            "NETPBM raster truncated: {} samples declared, {} bytes left",
            count, remaining
        )));
    }
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let token = next_token(data, pos)?;
        let sample = token
            .parse::<u32>()
            .map_err(|_| GeoError::ParseError(format!("Invalid NETPBM sample: {}", token)))?;
        samples.push(sample as f64);
    }
    Ok(samples)
}
