use lopdf::content::{Content, Operation};
use lopdf::Object;

/// One element of a `TJ` array.
#[derive(Debug, Clone, PartialEq)]
pub enum TjPart {
    Text(Vec<u8>),
    Adjust(f32),
}

pub fn decode_ops(bytes: &[u8]) -> Vec<Operation> {
    Content::decode(bytes)
        .expect("content stream should decode")
        .operations
}

pub fn operators(ops: &[Operation]) -> Vec<&str> {
    ops.iter().map(|op| op.operator.as_str()).collect()
}

pub fn floats(op: &Operation) -> Vec<f32> {
    op.operands
        .iter()
        .map(|o| o.as_float().expect("numeric operand"))
        .collect()
}

/// The arrays of all `TJ` operators, in order.
pub fn tj_arrays(ops: &[Operation]) -> Vec<Vec<TjPart>> {
    ops.iter()
        .filter(|op| op.operator == "TJ")
        .map(|op| {
            op.operands[0]
                .as_array()
                .expect("TJ takes an array")
                .iter()
                .map(|item| match item {
                    Object::String(bytes, _) => TjPart::Text(bytes.clone()),
                    other => TjPart::Adjust(other.as_float().expect("TJ number")),
                })
                .collect()
        })
        .collect()
}

pub fn text(s: &str) -> TjPart {
    TjPart::Text(s.as_bytes().to_vec())
}

/// Name operand of the `index`-th operator called `operator`.
pub fn name_operand(ops: &[Operation], operator: &str, index: usize) -> String {
    let op = ops
        .iter()
        .filter(|op| op.operator == operator)
        .nth(index)
        .unwrap_or_else(|| panic!("no {} operator #{}", operator, index));
    String::from_utf8_lossy(op.operands[0].as_name().expect("name operand")).to_string()
}

#[macro_export]
macro_rules! assert_operators {
    ($bytes:expr, [$($op:expr),* $(,)?]) => {{
        let ops = $crate::common::content_assertions::decode_ops(&$bytes);
        let expected: Vec<&str> = vec![$($op),*];
        assert_eq!(
            $crate::common::content_assertions::operators(&ops),
            expected,
            "unexpected operator sequence"
        );
    }};
}
