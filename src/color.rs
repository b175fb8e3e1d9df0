// Simple color struct. Channels are bytes, alpha is a fraction in [0, 1] so it
// can be composed with per-particle and per-line opacity without rounding.

use crate::error::ColorParseError;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

// CSS Color Module Level 4 named colors, 0xRRGGBB.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

fn number(part: &str) -> Result<f64, ColorParseError> {
    part.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorParseError::Component(part.to_owned()))
}

// `50%` -> 0.5, clamped to [0, 1] like the browser does for s and l.
fn percentage(part: &str) -> Result<f64, ColorParseError> {
    let value = part
        .strip_suffix('%')
        .ok_or_else(|| ColorParseError::Component(part.to_owned()))?;
    Ok((number(value)? / 100.0).max(0.0).min(1.0))
}

fn alpha(part: &str) -> Result<f64, ColorParseError> {
    let value = match part.strip_suffix('%') {
        Some(p) => number(p)? / 100.0,
        None => number(part)?,
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorParseError::Component(part.to_owned()));
    }
    Ok(value)
}

fn channel(part: &str) -> Result<u8, ColorParseError> {
    let value = number(part)?;
    if !(0.0..=255.0).contains(&value) {
        return Err(ColorParseError::Component(part.to_owned()));
    }
    Ok(value.round() as u8)
}

fn hue_to_rgb(t1: f64, t2: f64, mut h: f64) -> f64 {
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }
    if h * 6.0 < 1.0 {
        t1 + (t2 - t1) * h * 6.0
    } else if h * 2.0 < 1.0 {
        t2
    } else if h * 3.0 < 2.0 {
        t1 + (t2 - t1) * (2.0 / 3.0 - h) * 6.0
    } else {
        t1
    }
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    // Created from an unsigned 32 representing RRGGBBAA
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num & 0xff) as f64 / 255.0;

        Color { r, g, b, a }
    }

    /// Hue in degrees, saturation and lightness in [0, 1].
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64, a: f64) -> Color {
        let h = hue.rem_euclid(360.0) / 360.0;
        let t2 = if lightness <= 0.5 {
            lightness * (saturation + 1.0)
        } else {
            lightness + saturation - lightness * saturation
        };
        let t1 = lightness * 2.0 - t2;
        let byte = |v: f64| (v * 255.0).round().max(0.0).min(255.0) as u8;

        Color {
            r: byte(hue_to_rgb(t1, t2, h + 1.0 / 3.0)),
            g: byte(hue_to_rgb(t1, t2, h)),
            b: byte(hue_to_rgb(t1, t2, h - 1.0 / 3.0)),
            a,
        }
    }

    /// Returns this color with its alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f64) -> Color {
        Color {
            a: (self.a * factor).max(0.0).min(1.0),
            ..self
        }
    }

    /// Parses comma-separated `rgb()`/`rgba()`/`hsl()`/`hsla()`, hex
    /// (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), named colors and
    /// `transparent`. The space-separated `rgb(1 2 3 / 0.5)` form is not
    /// supported.
    pub fn parse_css(input: &str) -> Result<Color, ColorParseError> {
        let syntax = || ColorParseError::Syntax(input.to_owned());
        let lower = input.trim().to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return Color::parse_hex(hex).ok_or_else(syntax);
        }
        if lower == "transparent" {
            return Ok(Color::rgba(0, 0, 0, 0.0));
        }
        if let Some(&(_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(Color::from_u32(rgb << 8 | 0xff));
        }

        let open = lower.find('(').ok_or_else(syntax)?;
        let function = lower[..open].trim_end();
        let body = lower[open + 1..].strip_suffix(')').ok_or_else(syntax)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(syntax());
        }
        let a = match parts.get(3) {
            Some(part) => alpha(part)?,
            None => 1.0,
        };

        match function {
            "rgb" | "rgba" => Ok(Color {
                r: channel(parts[0])?,
                g: channel(parts[1])?,
                b: channel(parts[2])?,
                a,
            }),
            "hsl" | "hsla" => {
                let hue = number(parts[0].trim_end_matches("deg"))?;
                Ok(Color::from_hsl(hue, percentage(parts[1])?, percentage(parts[2])?, a))
            }
            _ => Err(syntax()),
        }
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let doubled = |digits: &str| -> String { digits.chars().flat_map(|c| vec![c, c]).collect() };
        let expanded: String = match hex.len() {
            3 => format!("{}ff", doubled(hex)),
            4 => doubled(hex),
            6 => format!("{}ff", hex),
            8 => hex.to_owned(),
            _ => return None,
        };
        u32::from_str_radix(&expanded, 16).ok().map(Color::from_u32)
    }

    /// CSS representation suitable for a canvas fill or stroke style.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_css(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgba_with_spaces() {
        let c = Color::parse_css("rgba(100, 150, 255, 0.7)").unwrap();
        assert_eq!(c, Color::rgba(100, 150, 255, 0.7));
    }

    #[test]
    fn rgb_is_opaque() {
        let c = Color::parse_css("rgb(1,2,3)").unwrap();
        assert_eq!(c.a, 1.0);
        assert_eq!((c.r, c.g, c.b), (1, 2, 3));
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse_css("#fff").unwrap(), Color::rgba(255, 255, 255, 1.0));
        assert_eq!(Color::parse_css("#102030").unwrap(), Color::rgba(0x10, 0x20, 0x30, 1.0));
        let c = Color::parse_css("#00000000").unwrap();
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn parses_short_hex_with_alpha() {
        let c = Color::parse_css("#f008").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
        assert!((c.a - 0x88 as f64 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse_css("blue").unwrap(), Color::rgba(0, 0, 255, 1.0));
        assert_eq!(Color::parse_css(" RebeccaPurple ").unwrap(), Color::rgba(0x66, 0x33, 0x99, 1.0));
        assert_eq!(Color::parse_css("transparent").unwrap().a, 0.0);
    }

    #[test]
    fn parses_hsl_forms() {
        assert_eq!(Color::parse_css("hsl(0, 100%, 50%)").unwrap(), Color::rgba(255, 0, 0, 1.0));
        assert_eq!(Color::parse_css("hsl(120deg, 100%, 25%)").unwrap(), Color::rgba(0, 128, 0, 1.0));
        let c = Color::parse_css("hsla(240, 100%, 50%, 0.7)").unwrap();
        assert_eq!(c, Color::rgba(0, 0, 255, 0.7));
        assert_eq!(Color::parse_css("hsl(0, 0%, 100%)").unwrap(), Color::rgba(255, 255, 255, 1.0));
    }

    #[test]
    fn alpha_accepts_percentages() {
        assert_eq!(Color::parse_css("rgba(0, 0, 0, 50%)").unwrap().a, 0.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse_css("bluish").is_err());
        assert!(Color::parse_css("rgba(1, 2)").is_err());
        assert!(Color::parse_css("rgb(300, 0, 0)").is_err());
        assert!(Color::parse_css("rgba(0, 0, 0, 2)").is_err());
        assert!(Color::parse_css("hsl(0, 100, 50%)").is_err());
        assert!(Color::parse_css("rgb(1 2 3 / 0.5)").is_err());
        assert!(Color::parse_css("cmyk(0, 0, 0, 0)").is_err());
        assert!(Color::parse_css("#12345").is_err());
    }

    #[test]
    fn alpha_composes_by_multiplication() {
        let line = Color::rgba(255, 255, 255, 0.2);
        let faded = line.scale_alpha(0.5);
        assert!((faded.a - 0.1).abs() < 1e-12);
        assert_eq!((faded.r, faded.g, faded.b), (255, 255, 255));
        assert_eq!(line.scale_alpha(1.0), line);
        assert_eq!(line.scale_alpha(-3.0).a, 0.0);
    }

    #[test]
    fn css_output_round_trips_through_the_parser() {
        let c = Color::rgba(12, 34, 56, 0.25);
        assert_eq!(c.to_css(), "rgba(12, 34, 56, 0.25)");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }
}
