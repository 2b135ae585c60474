#[macro_export]
macro_rules! tree {
    ($e:expr) => {{
        use $crate::tree::tree_parser::from_topology;
        from_topology($e).unwrap()
    }};
}

#[macro_export]
macro_rules! matrix {
    ($($taxon:expr => $states:expr),+ $(,)?) => {{
        use $crate::characters::CharacterMatrix;
        CharacterMatrix::new(
            vec![$($taxon.to_string()),+],
            vec![$($states.to_vec()),+],
        )
        .unwrap()
    }};
}
