use std::cmp::Ordering;
use tokcoll::{
    codec, tokens, Codec, Collection, Error, Matrix, Separator, TextCodec, TokenBuffer, TokenMap,
};

#[derive(Debug, Clone, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

fn product_codec() -> impl Codec<Product> {
    codec(
        |p: &Product| format!("{},{},{}", p.sku, p.price, p.quantity),
        |s: &str| {
            let mut parts = s.split(',');
            let mut next = || parts.next().ok_or_else(|| Error::parse(s, "missing column"));
            let sku = next()?.to_string();
            let price = next()?.parse().map_err(|e| Error::parse(s, e))?;
            let quantity = next()?.parse().map_err(|e| Error::parse(s, e))?;
            Ok(Product {
                sku,
                price,
                quantity,
            })
        },
    )
}

fn product(sku: &str, price: f64, quantity: u32) -> Product {
    Product {
        sku: sku.to_string(),
        price,
        quantity,
    }
}

#[test]
fn test_token_buffer_scenario() {
    let mut buf = TokenBuffer::new();
    buf.push("10").unwrap();
    buf.push("20").unwrap();
    buf.push("30").unwrap();
    assert_eq!(buf.as_str(), "10|20|30");
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.get(1).unwrap(), "20");

    buf.remove(1).unwrap();
    assert_eq!(buf.as_str(), "10|30");
    assert_eq!(buf.len(), 2);

    buf.set(0, "99").unwrap();
    assert_eq!(buf.as_str(), "99|30");
    assert_eq!(buf.position("30"), Some(1));
}

#[test]
fn test_records_with_comma_columns() {
    let pc = product_codec();
    let mut inventory = Collection::with_separator(Separator::Pipe);
    inventory.add(&product("WIDGET-001", 29.99, 2), &pc).unwrap();
    inventory.add(&product("GADGET-002", 49.99, 1), &pc).unwrap();
    inventory.add(&product("BOLT-003", 0.5, 100), &pc).unwrap();
    println!("Inventory buffer: {}", inventory);

    assert_eq!(
        inventory.as_text(),
        "WIDGET-001,29.99,2|GADGET-002,49.99,1|BOLT-003,0.5,100"
    );

    let idx = inventory
        .find("GADGET-002", |p: &Product, k: &str| p.sku.as_str().cmp(k), &pc)
        .unwrap();
    assert_eq!(idx, Some(1));

    inventory
        .sort(
            |a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            &pc,
        )
        .unwrap();
    let skus: Vec<String> = inventory
        .iter(&pc)
        .map(|p| p.map(|p| p.sku))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(skus, vec!["BOLT-003", "WIDGET-001", "GADGET-002"]);
}

#[test]
fn test_decode_failure_surfaces_as_parse_error() {
    let mut wide: Collection<u32> = Collection::new();
    wide.add(&7, &TextCodec).unwrap();
    wide.add(&300, &TextCodec).unwrap();

    // Reinterpret the same buffer with a narrower element type.
    let json = serde_json::to_string(&wide).unwrap();
    let narrow: Collection<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(narrow.get(0, &TextCodec).unwrap(), 7);
    match narrow.get(1, &TextCodec) {
        Err(Error::Parse { text, .. }) => assert_eq!(text, "300"),
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert!(narrow.to_vec(&TextCodec).is_err());
}

#[test]
fn test_iteration_protocol() {
    let mut coll: Collection<u16> = Collection::new();
    for n in [4, 8, 15, 16, 23, 42] {
        coll.add(&n, &TextCodec).unwrap();
    }

    let mut total = 0;
    while coll.has_next() {
        total += coll.next(&TextCodec).unwrap();
    }
    assert_eq!(total, 108);
    assert_eq!(coll.next(&TextCodec), Err(Error::iterator_exhausted(6)));

    coll.reset();
    assert_eq!(coll.next_checked(&TextCodec).unwrap(), Some(4));
}

#[test]
fn test_removing_every_element_from_the_front() {
    let mut coll: Collection<char> = Collection::with_separator(',');
    for c in "tokens".chars() {
        coll.add(&c, &TextCodec).unwrap();
    }
    assert_eq!(coll.as_text(), "t,o,k,e,n,s");

    let mut drained = String::new();
    while !coll.is_empty() {
        drained.push(coll.remove(0, &TextCodec).unwrap());
    }
    assert_eq!(drained, "tokens");
    assert_eq!(coll.as_text(), "");
}

#[test]
fn test_ordered_insert_builds_sorted_collection() {
    let mut words: Collection<String> = Collection::new();
    for w in ["pear", "apple", "fig", "banana", "apple"] {
        words
            .ordered_insert(&w.to_string(), |a, b| a.cmp(b), &TextCodec)
            .unwrap();
    }
    assert_eq!(words.as_text(), "apple|apple|banana|fig|pear");
}

#[test]
fn test_matrix_scenario() {
    let mut m = Matrix::new(2, 3, &0, &TextCodec).unwrap();
    m.set(&7, 1, 2, &TextCodec).unwrap();
    assert_eq!(m.index(1, 2), 5);
    assert_eq!(m.get(1, 2, &TextCodec).unwrap(), 7);
    assert_eq!(m.as_text(), "0|0|0|0|0|7");
}

#[test]
fn test_matrix_of_strings_with_tab_separator() {
    let mut board = Matrix::with_separator(3, 3, &".".to_string(), '\t', &TextCodec).unwrap();
    board.set(&"X".to_string(), 1, 1, &TextCodec).unwrap();
    board.set(&"O".to_string(), 0, 2, &TextCodec).unwrap();

    let mut rendered = String::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            rendered.push_str(&board.get(row, col, &TextCodec).unwrap());
        }
        rendered.push('\n');
    }
    assert_eq!(rendered, "..O\n.X.\n...\n");
}

#[test]
fn test_word_frequency_map() {
    let mut freq: TokenMap<String, u32> = TokenMap::new();
    for word in "the cat and the hat and the bat".split(' ') {
        let key = word.to_string();
        let count = freq.discover(&key, 0, &TextCodec, &TextCodec).unwrap();
        freq.put(&key, &(count + 1), &TextCodec, &TextCodec).unwrap();
    }

    assert_eq!(freq.get(&"the".to_string(), &TextCodec, &TextCodec).unwrap(), Some(3));
    assert_eq!(freq.get(&"and".to_string(), &TextCodec, &TextCodec).unwrap(), Some(2));

    freq.sort_by_values(|a, b| b.cmp(a), &TextCodec, &TextCodec)
        .unwrap();
    assert_eq!(freq.next_key(&TextCodec).unwrap(), "the");
    assert_eq!(freq.next_value(&TextCodec).unwrap(), 3);
}

#[test]
fn test_snapshot_roundtrip_through_json() {
    let mut coll: Collection<i32> = Collection::with_separator(';');
    for n in [3, 1, 2] {
        coll.add(&n, &TextCodec).unwrap();
    }
    coll.next(&TextCodec).unwrap();

    let json = serde_json::to_string(&coll).unwrap();
    let back: Collection<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, coll);
    assert_eq!(back.cursor(), 1);
    assert_eq!(back.as_text(), "3;1;2");

    let m = Matrix::new(2, 2, &1, &TextCodec).unwrap();
    let json = serde_json::to_string(&m).unwrap();
    let back: Matrix<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn test_tokens_macro_and_blank_buffer() {
    let buf = tokens!['|'; "a", "b", "c"].unwrap();
    assert_eq!(buf.fields().collect::<Vec<_>>(), vec!["a", "b", "c"]);

    let mut blank = TokenBuffer::blank(3, '|');
    blank.set(1, "x").unwrap();
    assert_eq!(blank.as_str(), " |x| ");
}
