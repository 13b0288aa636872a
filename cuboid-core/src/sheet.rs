/// Face sheet parser.
///
/// A sheet is plain text holding the four face rasters in order, each one
/// introduced by a `[face]` header line (anything after the header on the same
/// line is a label and ignored). Lines before the first header are a free-form
/// preamble. Trailing blank rows of a face are dropped.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{line_ending, not_line_ending},
    combinator::{eof, not},
    multi::many0,
    sequence::terminated,
    IResult,
};

use crate::config::FACE_COUNT;
use crate::error::{CuboidError, Result};
use crate::surface::GlyphSurface;

const FACE_HEADER: &str = "[face]";

/// Parse a sheet into exactly four face surfaces
pub fn parse_face_sheet(input: &str) -> Result<[GlyphSurface; FACE_COUNT]> {
    let faces = match parse_sheet(input) {
        Ok((_, faces)) => faces,
        Err(e) => return Err(CuboidError::Parse(format!("{:?}", e))),
    };

    let surfaces: Vec<GlyphSurface> = faces
        .into_iter()
        .map(|mut rows| {
            while rows.last().is_some_and(|row| row.trim().is_empty()) {
                rows.pop();
            }
            GlyphSurface::from_lines(&rows)
        })
        .collect();

    surfaces
        .try_into()
        .map_err(|found: Vec<GlyphSurface>| CuboidError::FaceCount { found: found.len() })
}

fn parse_sheet(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    let (input, _) = many0(plain_line)(input)?;
    let (input, faces) = many0(face_block)(input)?;
    let (input, _) = eof(input)?;
    Ok((input, faces))
}

fn face_block(input: &str) -> IResult<&str, Vec<&str>> {
    let (input, _) = header(input)?;
    many0(plain_line)(input)
}

fn header(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag(FACE_HEADER)(input)?;
    terminated(not_line_ending, line_end)(input)
}

fn plain_line(input: &str) -> IResult<&str, &str> {
    let (input, _) = not(eof)(input)?;
    let (input, _) = not(tag(FACE_HEADER))(input)?;
    terminated(not_line_ending, line_end)(input)
}

fn line_end(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof))(input)
}
