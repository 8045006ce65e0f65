use shoptier_customers::Customer;

use crate::rule::GraduatedPrice;

/// Pluggable predicate that can veto an otherwise eligible price rule.
///
/// Hooks are held as an ordered list and evaluated in registration order;
/// any hook returning `false` disqualifies the candidate. With no hooks
/// registered every candidate qualifies.
pub trait QualificationHook {
    fn is_qualified(&self, rule: &GraduatedPrice, customer: Option<&Customer>) -> bool;
}

/// Blanket impl so plain closures can be registered as hooks.
impl<F> QualificationHook for F
where
    F: Fn(&GraduatedPrice, Option<&Customer>) -> bool,
{
    fn is_qualified(&self, rule: &GraduatedPrice, customer: Option<&Customer>) -> bool {
        self(rule, customer)
    }
}

pub(crate) fn is_qualified(
    hooks: &[Box<dyn QualificationHook>],
    rule: &GraduatedPrice,
    customer: Option<&Customer>,
) -> bool {
    hooks.iter().all(|hook| hook.is_qualified(rule, customer))
}
