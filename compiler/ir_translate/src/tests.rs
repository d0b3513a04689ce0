use super::*;
use pretty_assertions::assert_eq;

#[test]
fn erases_a_type_annotation_while_preserving_length_and_newline_position() {
    // Literal Scenario 5 input/output/regions from spec.md.
    let source = "local x : integer = 1  -- n\n";
    let type_regions = [(9, 18)]; // ": integer " — colon through the space before '='
    let comment_regions = [(22, 26)]; // "-- n", outside the type region

    let out = translate(source, &type_regions, &comment_regions);

    assert_eq!(out, "local x           = 1  -- n\n");
    assert_eq!(out.len(), source.len());
    assert_eq!(out.find('\n'), source.find('\n'));
}

#[test]
fn a_comment_fully_inside_a_type_region_survives_verbatim() {
    let source = "AAAABBBBCCCC\n";
    let type_regions = [(1, 12)];
    let comment_regions = [(5, 8)];

    let out = translate(source, &type_regions, &comment_regions);

    assert_eq!(out, "    BBBB    \n");
    assert_eq!(out.len(), source.len());
}

#[test]
fn regions_outside_any_type_span_are_left_untouched() {
    let source = "return 1\n";
    let out = translate(source, &[], &[]);
    assert_eq!(out, source);
}

#[test]
#[should_panic(expected = "straddles")]
fn a_comment_straddling_a_type_region_boundary_is_a_parser_bug() {
    let source = "AAAABBBBCCCC\n";
    let type_regions = [(1, 6)];
    let comment_regions = [(5, 10)]; // starts inside the type region, ends outside it
    let _ = translate(source, &type_regions, &comment_regions);
}

#[test]
fn multiple_disjoint_type_regions_are_each_erased_independently() {
    let source = "a : int, b : bool = 1, true\n";
    // ": int" spans 1-based 3..7, ": bool" spans 1-based 12..17.
    let type_regions = [(3, 7), (12, 17)];
    let out = translate(source, &type_regions, &[]);

    assert_eq!(out.len(), source.len());
    assert_eq!(&out[0..2], "a ");
    assert!(out[2..=6].chars().all(|c| c == ' '));
    assert_eq!(&out[17..], " = 1, true\n");
}
