use obj_scene::geometry::obj::{self, ObjErrorKind, ParseOptions};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f32> {
    (-1000i32..1000).prop_map(|n| n as f32 / 8.0)
}

fn positions() -> impl Strategy<Value = Vec<[f32; 3]>> {
    prop::collection::vec([coordinate(), coordinate(), coordinate()], 1..16)
}

/// 位置表加上若干个引用合法的面
fn document() -> impl Strategy<Value = (Vec<[f32; 3]>, Vec<Vec<usize>>)> {
    positions().prop_flat_map(|table| {
        let len = table.len();
        let face = prop::collection::vec(1..=len, 3..8);
        (Just(table), prop::collection::vec(face, 0..6))
    })
}

fn render(table: &[[f32; 3]], faces: &[Vec<usize>]) -> String {
    let mut text = String::new();
    for [x, y, z] in table {
        text.push_str(&format!("v {} {} {}\n", x, y, z));
    }
    for face in faces {
        let refs: Vec<String> = face.iter().map(|i| i.to_string()).collect();
        text.push_str(&format!("f {}\n", refs.join(" ")));
    }
    text
}

proptest! {
    #[test]
    fn parse_is_deterministic((table, faces) in document()) {
        let text = render(&table, &faces);
        let first = obj::parse(&text).unwrap();
        let second = obj::parse(&text).unwrap();

        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first.position), bits(&second.position));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn faces_fan_into_triangles((table, faces) in document()) {
        let mesh = obj::parse(&render(&table, &faces)).unwrap();

        let expected: usize = faces.iter().map(|f| f.len() - 2).sum();
        prop_assert_eq!(mesh.triangle_count(), expected);
        prop_assert_eq!(mesh.position.len(), 3 * 3 * expected);
        prop_assert!(mesh.texcoord.is_empty());
        prop_assert!(mesh.normal.is_empty());

        // 每个三角形是 [0, i+1, i+2]
        let mut emitted = mesh.position.chunks_exact(3);
        for face in &faces {
            for i in 0..face.len() - 2 {
                for corner in [face[0], face[i + 1], face[i + 2]] {
                    prop_assert_eq!(emitted.next().unwrap(), &table[corner - 1][..]);
                }
            }
        }
    }

    #[test]
    fn stream_lengths_follow_references(count in 3usize..10) {
        let mut text = String::from("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n");
        let refs: Vec<&str> = (0..count).map(|i| ["1/1/1", "2/1/1", "3/1/1"][i % 3]).collect();
        text.push_str(&format!("f {}\n", refs.join(" ")));

        let mesh = obj::parse(&text).unwrap();
        let emitted = 3 * (count - 2);
        prop_assert_eq!(mesh.position.len(), 3 * emitted);
        prop_assert_eq!(mesh.texcoord.len(), 2 * emitted);
        prop_assert_eq!(mesh.normal.len(), 3 * emitted);
    }

    #[test]
    fn last_relative_index_is_table_length(table in positions()) {
        let len = table.len();
        let head = render(&table, &[]);

        let relative = obj::parse(&format!("{}f -1 -1 -1\n", head)).unwrap();
        let absolute = obj::parse(&format!("{}f {len} {len} {len}\n", head)).unwrap();
        prop_assert_eq!(relative, absolute);
    }

    #[test]
    fn out_of_range_index_is_rejected(table in positions(), extra in 1usize..5) {
        let bad = table.len() + extra;
        let text = format!("{}f 1 1 {}\n", render(&table, &[]), bad);

        let err = obj::parse(&text).unwrap_err();
        let is_malformed_index = matches!(err.kind, ObjErrorKind::MalformedIndex { .. });
        prop_assert!(is_malformed_index);
        prop_assert_eq!(err.line, table.len() + 1);
    }

    #[test]
    fn arbitrary_text_never_panics(s in "[vtnf0-9 ./#\\-\n]{0,200}") {
        let _ = obj::parse(&s);
        let _ = obj::parse_with(&s, ParseOptions::strict());
        let _ = obj::parse_with(&s, ParseOptions::resilient());
    }
}
