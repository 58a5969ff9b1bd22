use mctype::{
    read_bool, read_f64, read_i16, read_i64, read_position, read_string, read_varint,
    read_varlong, varint_len, varlong_len, write_bool, write_f64, write_i16, write_i64,
    write_position, write_string, write_varint, write_varlong, ByteReader, Position,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    VarInt(i32),
    VarLong(i64),
    Short(i16),
    Long(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Pos { x: i32, y: i32, z: i32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::VarInt),
        any::<i64>().prop_map(Op::VarLong),
        any::<i16>().prop_map(Op::Short),
        any::<i64>().prop_map(Op::Long),
        any::<f64>().prop_map(Op::Double),
        any::<bool>().prop_map(Op::Bool),
        ".{0,32}".prop_map(Op::Str),
        (
            -(1i32 << 25)..(1i32 << 25),
            -(1i32 << 11)..(1i32 << 11),
            -(1i32 << 25)..(1i32 << 25),
        )
            .prop_map(|(x, y, z)| Op::Pos { x, y, z }),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..48)) {
        let mut buf = Vec::new();

        for op in &ops {
            match op {
                Op::VarInt(v) => write_varint(&mut buf, *v),
                Op::VarLong(v) => write_varlong(&mut buf, *v),
                Op::Short(v) => write_i16(&mut buf, *v),
                Op::Long(v) => write_i64(&mut buf, *v),
                Op::Double(v) => write_f64(&mut buf, *v),
                Op::Bool(v) => write_bool(&mut buf, *v),
                Op::Str(v) => write_string(&mut buf, v),
                Op::Pos { x, y, z } => write_position(&mut buf, Position::new(*x, *y, *z)),
            }
        }

        let mut reader = ByteReader::new(&buf);

        for op in &ops {
            match op {
                Op::VarInt(v) => prop_assert_eq!(read_varint(&mut reader).unwrap(), *v),
                Op::VarLong(v) => prop_assert_eq!(read_varlong(&mut reader).unwrap(), *v),
                Op::Short(v) => prop_assert_eq!(read_i16(&mut reader).unwrap(), *v),
                Op::Long(v) => prop_assert_eq!(read_i64(&mut reader).unwrap(), *v),
                Op::Double(v) => {
                    let decoded = read_f64(&mut reader).unwrap();
                    prop_assert_eq!(decoded.to_bits(), v.to_bits());
                }
                Op::Bool(v) => prop_assert_eq!(read_bool(&mut reader).unwrap(), *v),
                Op::Str(v) => prop_assert_eq!(&read_string(&mut reader).unwrap(), v),
                Op::Pos { x, y, z } => {
                    prop_assert_eq!(
                        read_position(&mut reader).unwrap(),
                        Position::new(*x, *y, *z)
                    );
                }
            }
        }

        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_varint_length_formula(v in any::<i32>()) {
        let mut buf = Vec::new();
        write_varint(&mut buf, v);
        prop_assert_eq!(buf.len(), varint_len(v));
        prop_assert!(buf.len() <= 5);
    }

    #[test]
    fn prop_varlong_length_formula(v in any::<i64>()) {
        let mut buf = Vec::new();
        write_varlong(&mut buf, v);
        prop_assert_eq!(buf.len(), varlong_len(v));
        prop_assert!(buf.len() <= 10);
    }
}
