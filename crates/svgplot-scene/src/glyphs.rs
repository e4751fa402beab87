//! Static glyph library.
//!
//! Each entry maps a character to its advance width in font units and a
//! digitized stroke path. The font-unit system is 1050 units tall with the
//! baseline at y = 0 and y increasing upward; the renderer flips glyphs
//! into SVG's y-down space with `scale(1,-1)` inside the symbol.

/// Height of the font-unit coordinate system.
pub const UNITS_PER_EM: f64 = 1050.0;

/// Advance applied for characters missing from the table.
pub const UNKNOWN_ADVANCE: f64 = 300.0;

#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    pub advance: f64,
    pub path: &'static str,
}

/// Looks up a glyph. The table is sorted by character, so this is a binary
/// search.
pub fn glyph(c: char) -> Option<&'static Glyph> {
    GLYPHS
        .binary_search_by_key(&c, |(ch, _)| *ch)
        .ok()
        .map(|i| &GLYPHS[i].1)
}

macro_rules! g {
    ($ch:literal, $advance:literal, $path:literal) => {
        ($ch, Glyph { advance: $advance, path: $path })
    };
}

/// Sorted by character code.
static GLYPHS: &[(char, Glyph)] = &[
    g!(' ', 278.0, ""),
    g!('!', 278.0, "M 139 700 L 139 220 M 139 80 L 139 0"),
    g!('"', 355.0, "M 120 700 L 120 520 M 235 700 L 235 520"),
    g!('#', 556.0, "M 180 700 L 120 0 M 436 700 L 376 0 M 60 450 L 520 450 M 40 250 L 500 250"),
    g!('%', 889.0, "M 760 700 L 130 0 M 210 700 C 320 700 320 480 210 480 C 100 480 100 700 210 700 M 680 220 C 790 220 790 0 680 0 C 570 0 570 220 680 220"),
    g!('&', 667.0, "M 600 0 C 200 440 240 700 420 700 C 580 700 560 500 380 400 C 160 280 200 0 380 0 C 480 0 540 60 580 160"),
    g!('\'', 191.0, "M 95 700 L 95 520"),
    g!('(', 333.0, "M 260 700 C 80 520 80 180 260 0"),
    g!(')', 333.0, "M 73 700 C 253 520 253 180 73 0"),
    g!('*', 389.0, "M 194 700 L 194 460 M 90 640 L 298 520 M 298 640 L 90 520"),
    g!('+', 584.0, "M 292 520 L 292 80 M 72 300 L 512 300"),
    g!(',', 278.0, "M 160 80 C 160 -40 120 -120 80 -160"),
    g!('-', 333.0, "M 50 250 L 283 250"),
    g!('.', 278.0, "M 139 80 L 139 0"),
    g!('/', 278.0, "M 250 700 L 28 0"),
    g!('0', 556.0, "M 278 700 C 120 700 80 520 80 350 C 80 180 120 0 278 0 C 436 0 476 180 476 350 C 476 520 436 700 278 700"),
    g!('1', 556.0, "M 160 540 L 300 700 L 300 0"),
    g!('2', 556.0, "M 100 560 C 140 720 460 720 460 520 C 460 380 300 260 100 0 L 470 0"),
    g!('3', 556.0, "M 100 620 C 240 760 470 680 420 500 C 400 420 320 380 260 380 C 340 380 460 320 440 160 C 420 -20 140 -40 80 120"),
    g!('4', 556.0, "M 360 0 L 360 700 L 60 200 L 500 200"),
    g!('5', 556.0, "M 420 700 L 140 700 L 100 380 C 260 480 470 400 460 220 C 450 20 160 -60 80 100"),
    g!('6', 556.0, "M 400 680 C 180 620 80 420 100 200 C 120 20 420 -40 460 160 C 490 340 220 420 120 280"),
    g!('7', 556.0, "M 80 700 L 480 700 L 220 0"),
    g!('8', 556.0, "M 278 380 C 120 380 100 700 278 700 C 456 700 436 380 278 380 C 100 380 60 0 278 0 C 496 0 456 380 278 380"),
    g!('9', 556.0, "M 440 420 C 340 280 80 360 100 540 C 120 740 420 720 450 520 C 480 300 380 80 160 20"),
    g!(':', 278.0, "M 139 480 L 139 400 M 139 80 L 139 0"),
    g!(';', 278.0, "M 160 480 L 160 400 M 160 80 C 160 -40 120 -120 80 -160"),
    g!('=', 584.0, "M 72 380 L 512 380 M 72 220 L 512 220"),
    g!('?', 556.0, "M 120 560 C 140 740 450 720 450 520 C 450 380 278 340 278 220 M 278 80 L 278 0"),
    g!('A', 667.0, "M 60 0 L 333 700 L 606 0 M 160 230 L 506 230"),
    g!('B', 667.0, "M 90 0 L 90 700 L 400 700 C 570 700 570 380 400 380 L 90 380 M 400 380 C 590 380 590 0 400 0 L 90 0"),
    g!('C', 722.0, "M 640 550 C 520 760 160 740 90 480 C 60 330 90 170 180 90 C 330 -50 560 10 640 150"),
    g!('D', 722.0, "M 90 0 L 90 700 L 330 700 C 680 700 680 0 330 0 L 90 0"),
    g!('E', 667.0, "M 580 700 L 90 700 L 90 0 L 580 0 M 90 380 L 520 380"),
    g!('F', 611.0, "M 540 700 L 90 700 L 90 0 M 90 380 L 480 380"),
    g!('G', 778.0, "M 680 560 C 560 770 140 720 100 420 C 70 180 200 0 400 0 C 560 0 680 80 680 260 L 450 260"),
    g!('H', 722.0, "M 90 700 L 90 0 M 632 700 L 632 0 M 90 380 L 632 380"),
    g!('I', 278.0, "M 139 700 L 139 0"),
    g!('J', 500.0, "M 400 700 L 400 180 C 400 -40 100 -40 80 140"),
    g!('K', 667.0, "M 90 700 L 90 0 M 600 700 L 90 280 M 280 420 L 620 0"),
    g!('L', 556.0, "M 90 700 L 90 0 L 520 0"),
    g!('M', 833.0, "M 80 0 L 80 700 L 416 120 L 752 700 L 752 0"),
    g!('N', 722.0, "M 90 0 L 90 700 L 632 0 L 632 700"),
    g!('O', 778.0, "M 389 700 C 160 700 90 520 90 350 C 90 180 160 0 389 0 C 618 0 688 180 688 350 C 688 520 618 700 389 700"),
    g!('P', 667.0, "M 90 0 L 90 700 L 420 700 C 620 700 620 360 420 360 L 90 360"),
    g!('Q', 778.0, "M 389 700 C 160 700 90 520 90 350 C 90 180 160 0 389 0 C 618 0 688 180 688 350 C 688 520 618 700 389 700 M 480 180 L 700 -40"),
    g!('R', 722.0, "M 90 0 L 90 700 L 420 700 C 630 700 630 370 420 370 L 90 370 M 420 370 L 640 0"),
    g!('S', 667.0, "M 580 560 C 520 740 140 740 120 540 C 100 380 300 360 380 340 C 500 310 580 260 560 140 C 530 -60 120 -40 80 160"),
    g!('T', 611.0, "M 40 700 L 571 700 M 305 700 L 305 0"),
    g!('U', 722.0, "M 90 700 L 90 240 C 90 -80 632 -80 632 240 L 632 700"),
    g!('V', 667.0, "M 60 700 L 333 0 L 606 700"),
    g!('W', 944.0, "M 60 700 L 250 0 L 472 560 L 694 0 L 884 700"),
    g!('X', 667.0, "M 80 700 L 587 0 M 587 700 L 80 0"),
    g!('Y', 667.0, "M 60 700 L 333 340 L 606 700 M 333 340 L 333 0"),
    g!('Z', 611.0, "M 70 700 L 540 700 L 70 0 L 540 0"),
    g!('_', 556.0, "M 0 -140 L 556 -140"),
    g!('a', 556.0, "M 440 480 L 440 0 M 440 380 C 360 520 120 500 100 300 C 80 60 360 -40 440 120"),
    g!('b', 556.0, "M 100 700 L 100 0 M 100 360 C 180 520 440 500 460 280 C 480 40 180 -40 100 120"),
    g!('c', 500.0, "M 420 400 C 340 540 100 500 90 280 C 80 40 340 -40 430 100"),
    g!('d', 556.0, "M 456 700 L 456 0 M 456 360 C 376 520 116 500 96 280 C 76 40 376 -40 456 120"),
    g!('e', 556.0, "M 100 260 L 460 260 C 480 480 220 560 120 420 C 40 300 60 60 220 10 C 340 -20 420 40 450 100"),
    g!('f', 278.0, "M 240 700 C 120 700 110 640 110 520 L 110 0 M 40 480 L 220 480"),
    g!('g', 556.0, "M 456 480 L 456 -60 C 456 -240 180 -260 110 -120 M 456 360 C 376 520 116 500 96 280 C 76 40 376 -40 456 120"),
    g!('h', 556.0, "M 100 700 L 100 0 M 100 340 C 200 520 456 520 456 300 L 456 0"),
    g!('i', 222.0, "M 111 480 L 111 0 M 111 660 L 111 600"),
    g!('j', 222.0, "M 140 480 L 140 -80 C 140 -220 60 -240 20 -220 M 140 660 L 140 600"),
    g!('k', 500.0, "M 90 700 L 90 0 M 440 480 L 90 200 M 230 310 L 460 0"),
    g!('l', 222.0, "M 111 700 L 111 0"),
    g!('m', 833.0, "M 90 480 L 90 0 M 90 350 C 150 520 416 520 416 330 L 416 0 M 416 350 C 480 520 743 520 743 330 L 743 0"),
    g!('n', 556.0, "M 100 480 L 100 0 M 100 340 C 200 520 456 520 456 300 L 456 0"),
    g!('o', 556.0, "M 278 500 C 120 500 80 380 80 250 C 80 120 120 0 278 0 C 436 0 476 120 476 250 C 476 380 436 500 278 500"),
    g!('p', 556.0, "M 100 480 L 100 -200 M 100 360 C 180 520 460 500 460 260 C 460 20 180 -20 100 120"),
    g!('q', 556.0, "M 456 480 L 456 -200 M 456 360 C 376 520 96 500 96 260 C 96 20 376 -20 456 120"),
    g!('r', 333.0, "M 90 480 L 90 0 M 90 300 C 140 480 250 500 300 460"),
    g!('s', 500.0, "M 400 400 C 360 520 120 520 110 400 C 100 300 220 290 280 270 C 360 250 410 210 400 120 C 380 -40 110 -20 80 100"),
    g!('t', 278.0, "M 120 700 L 120 120 C 120 20 180 0 240 20 M 40 480 L 230 480"),
    g!('u', 556.0, "M 100 480 L 100 180 C 100 -40 456 -40 456 180 L 456 480 M 456 120 L 456 0"),
    g!('v', 500.0, "M 50 480 L 250 0 L 450 480"),
    g!('w', 722.0, "M 40 480 L 190 0 L 361 400 L 532 0 L 682 480"),
    g!('x', 500.0, "M 60 480 L 440 0 M 440 480 L 60 0"),
    g!('y', 500.0, "M 50 480 L 250 0 M 450 480 L 170 -200"),
    g!('z', 500.0, "M 60 480 L 430 480 L 60 0 L 440 0"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_char() {
        for pair in GLYPHS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} before {:?}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        assert_eq!(glyph('A').unwrap().advance, 667.0);
        assert_eq!(glyph('B').unwrap().advance, 667.0);
        assert!(glyph('\u{263a}').is_none());
    }

    #[test]
    fn space_advances_without_drawing() {
        let sp = glyph(' ').unwrap();
        assert_eq!(sp.advance, 278.0);
        assert!(sp.path.is_empty());
    }
}
