/// Asserts that `parser` accepts `input` and yields `expect`.
pub fn generic_command_parse<F, I, T, E>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> Result<T, E>,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug,
{
    let result = parser(input.clone());
    assert!(result.is_ok(), "The input:\r\n{:?}\r\nThe result:\r\n{:#?}", input, result);
    let res = result.unwrap();
    assert_eq!(
        expect, res,
        "The expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        expect, res
    );
}
