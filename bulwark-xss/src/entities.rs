//! Named and numeric character reference decoding.

use crate::error::DecodeFragmentError;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// `&quot;` `&amp;` `&lt;` `&gt;`
const BASIC: &[(&str, u32)] = &[("quot", 0x22), ("amp", 0x26), ("lt", 0x3C), ("gt", 0x3E)];

/// Latin-1 entities, in code point order starting at U+00A0.
const LATIN1: &[&str] = &[
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave",
    "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve",
    "Oacute", "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml",
    "Yacute", "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig",
    "ccedil", "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth",
    "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave",
    "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// HTML 4.0 symbols, Greek letters and special characters.
const HTML40_EXTENDED: &[(&str, u32)] = &[
    ("fnof", 402),
    ("Alpha", 913),
    ("Beta", 914),
    ("Gamma", 915),
    ("Delta", 916),
    ("Epsilon", 917),
    ("Zeta", 918),
    ("Eta", 919),
    ("Theta", 920),
    ("Iota", 921),
    ("Kappa", 922),
    ("Lambda", 923),
    ("Mu", 924),
    ("Nu", 925),
    ("Xi", 926),
    ("Omicron", 927),
    ("Pi", 928),
    ("Rho", 929),
    ("Sigma", 931),
    ("Tau", 932),
    ("Upsilon", 933),
    ("Phi", 934),
    ("Chi", 935),
    ("Psi", 936),
    ("Omega", 937),
    ("alpha", 945),
    ("beta", 946),
    ("gamma", 947),
    ("delta", 948),
    ("epsilon", 949),
    ("zeta", 950),
    ("eta", 951),
    ("theta", 952),
    ("iota", 953),
    ("kappa", 954),
    ("lambda", 955),
    ("mu", 956),
    ("nu", 957),
    ("xi", 958),
    ("omicron", 959),
    ("pi", 960),
    ("rho", 961),
    ("sigmaf", 962),
    ("sigma", 963),
    ("tau", 964),
    ("upsilon", 965),
    ("phi", 966),
    ("chi", 967),
    ("psi", 968),
    ("omega", 969),
    ("thetasym", 977),
    ("upsih", 978),
    ("piv", 982),
    ("bull", 8226),
    ("hellip", 8230),
    ("prime", 8242),
    ("Prime", 8243),
    ("oline", 8254),
    ("frasl", 8260),
    ("weierp", 8472),
    ("image", 8465),
    ("real", 8476),
    ("trade", 8482),
    ("alefsym", 8501),
    ("larr", 8592),
    ("uarr", 8593),
    ("rarr", 8594),
    ("darr", 8595),
    ("harr", 8596),
    ("crarr", 8629),
    ("lArr", 8656),
    ("uArr", 8657),
    ("rArr", 8658),
    ("dArr", 8659),
    ("hArr", 8660),
    ("forall", 8704),
    ("part", 8706),
    ("exist", 8707),
    ("empty", 8709),
    ("nabla", 8711),
    ("isin", 8712),
    ("notin", 8713),
    ("ni", 8715),
    ("prod", 8719),
    ("sum", 8721),
    ("minus", 8722),
    ("lowast", 8727),
    ("radic", 8730),
    ("prop", 8733),
    ("infin", 8734),
    ("ang", 8736),
    ("and", 8743),
    ("or", 8744),
    ("cap", 8745),
    ("cup", 8746),
    ("int", 8747),
    ("there4", 8756),
    ("sim", 8764),
    ("cong", 8773),
    ("asymp", 8776),
    ("ne", 8800),
    ("equiv", 8801),
    ("le", 8804),
    ("ge", 8805),
    ("sub", 8834),
    ("sup", 8835),
    ("nsub", 8836),
    ("sube", 8838),
    ("supe", 8839),
    ("oplus", 8853),
    ("otimes", 8855),
    ("perp", 8869),
    ("sdot", 8901),
    ("lceil", 8968),
    ("rceil", 8969),
    ("lfloor", 8970),
    ("rfloor", 8971),
    ("lang", 9001),
    ("rang", 9002),
    ("loz", 9674),
    ("spades", 9824),
    ("clubs", 9827),
    ("hearts", 9829),
    ("diams", 9830),
    ("OElig", 338),
    ("oelig", 339),
    ("Scaron", 352),
    ("scaron", 353),
    ("Yuml", 376),
    ("circ", 710),
    ("tilde", 732),
    ("ensp", 8194),
    ("emsp", 8195),
    ("thinsp", 8201),
    ("zwnj", 8204),
    ("zwj", 8205),
    ("lrm", 8206),
    ("rlm", 8207),
    ("ndash", 8211),
    ("mdash", 8212),
    ("lsquo", 8216),
    ("rsquo", 8217),
    ("sbquo", 8218),
    ("ldquo", 8220),
    ("rdquo", 8221),
    ("bdquo", 8222),
    ("dagger", 8224),
    ("Dagger", 8225),
    ("permil", 8240),
    ("lsaquo", 8249),
    ("rsaquo", 8250),
    ("euro", 8364),
];

/// Punctuation aliases used to hide scheme prefixes such as `javascript:`.
const PUNCTUATION: &[(&str, u32)] = &[("equals", 0x3D), ("colon", 0x3A), ("semi", 0x3B), ("comma", 0x2C)];

/// Process-wide entity table.
pub static ENTITY_TABLE: Lazy<EntityTable> = Lazy::new(EntityTable::new);

/// Immutable lookup from entity name (without `&` and `;`) to its character.
#[derive(Debug)]
pub struct EntityTable {
    named: HashMap<&'static str, char>,
    longest_name: usize,
}

impl EntityTable {
    fn new() -> Self {
        let latin1 = LATIN1
            .iter()
            .zip(0xA0u32..)
            .map(|(name, code)| (*name, code));

        let named: HashMap<&'static str, char> = BASIC
            .iter()
            .copied()
            .chain(latin1)
            .chain(HTML40_EXTENDED.iter().copied())
            .chain(PUNCTUATION.iter().copied())
            .filter_map(|(name, code)| char::from_u32(code).map(|c| (name, c)))
            .collect();

        let longest_name = named.keys().map(|name| name.len()).max().unwrap_or(0);

        Self { named, longest_name }
    }

    /// Look up a named entity, e.g. `lookup("lt") == Some('<')`.
    pub fn lookup(&self, name: &str) -> Option<char> {
        self.named.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Decode named and numeric character references in a single scan.
    ///
    /// Named references need their trailing `;`, numeric ones (`&#60`,
    /// `&#x3C`) do not. Anything unrecognized is copied through unchanged.
    pub fn decode<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if !input.contains('&') {
            return Cow::Borrowed(input);
        }

        let bytes = input.as_bytes();
        let mut out = String::with_capacity(input.len());
        let mut copied_to = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'&' {
                i += 1;
                continue;
            }

            let decoded = if bytes.get(i + 1) == Some(&b'#') {
                decode_numeric(input, i)
            } else {
                self.decode_named(input, i)
            };

            match decoded {
                Some((c, consumed)) => {
                    out.push_str(&input[copied_to..i]);
                    out.push(c);
                    i += consumed;
                    copied_to = i;
                }
                None => i += 1,
            }
        }

        if copied_to == 0 {
            return Cow::Borrowed(input);
        }
        out.push_str(&input[copied_to..]);
        Cow::Owned(out)
    }

    fn decode_named(&self, input: &str, amp: usize) -> Option<(char, usize)> {
        let rest = &input.as_bytes()[amp + 1..];
        let window = rest.len().min(self.longest_name + 1);
        let semi = rest[..window].iter().position(|&b| b == b';')?;
        // `;` is ASCII, so amp + 1 + semi is a char boundary
        let name = &input[amp + 1..amp + 1 + semi];
        self.lookup(name).map(|c| (c, semi + 2))
    }
}

/// Decode `&#...` at `amp`, returning the character and bytes consumed.
fn decode_numeric(input: &str, amp: usize) -> Option<(char, usize)> {
    let bytes = input.as_bytes();
    let mut start = amp + 2;
    let hex = matches!(bytes.get(start), Some(b'x' | b'X'));
    if hex {
        start += 1;
    }

    let digits = bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    if digits == 0 {
        return None;
    }
    let end = start + digits;
    let semi = bytes.get(end) == Some(&b';');
    let consumed = end - amp + usize::from(semi);

    let radix = if hex { 16 } else { 10 };
    // Decimal runs containing a-f are not references at all
    if !hex && !bytes[start..end].iter().all(u8::is_ascii_digit) {
        return None;
    }

    match u32::from_str_radix(&input[start..end], radix)
        .ok()
        .and_then(char::from_u32)
    {
        Some(c) => Some((c, consumed)),
        None => {
            DecodeFragmentError::NumericEntity {
                fragment: input[amp..amp + consumed].to_string(),
            }
            .log();
            None
        }
    }
}

/// Decode entities with the shared [`ENTITY_TABLE`].
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    ENTITY_TABLE.decode(input)
}
