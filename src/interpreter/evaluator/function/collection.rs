use ordered_float::OrderedFloat;

use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{CallSite, expect_dict, expect_integer, expect_list, expect_string},
        },
        value::core::{Value, ValueKind},
    },
    util::num::{clamp_insertion_index, resolve_index},
};

/// Appends a value to a list in place.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "var a = [1]; var b = a; append(b, 2); a").unwrap();
/// assert_eq!(value.to_string(), "[[1, 2], [1, 2], 0, [1, 2]]");
/// ```
pub fn append(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let list = expect_list(&args[0], site, "First argument must be a list")?;
    list.borrow_mut().push(args[1].clone());
    Ok(site.value(Value::null()))
}

/// Inserts a value before the given index.
///
/// Negative indices count from the end; indices below the start clamp to
/// the front.
///
/// # Errors
/// `IndexOutOfBounds` if the index is greater than the length of the list.
pub fn insert(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let list = expect_list(&args[0], site, "First argument must be a list")?;
    let index = expect_integer(&args[1], site, "Second argument must be a number")?;

    let mut elements = list.borrow_mut();
    if usize::try_from(index).is_ok_and(|index| index > elements.len()) {
        return Err(site.out_of_bounds("Second argument must be less than length of list"));
    }

    let position = clamp_insertion_index(elements.len(), index);
    elements.insert(position, args[2].clone());
    Ok(site.value(Value::null()))
}

/// Replaces a list element or a dictionary entry.
///
/// For a dictionary, a missing key is appended as a new entry.
///
/// # Errors
/// - `TypeError` for a container or key of the wrong kind.
/// - `IndexOutOfBounds` for an invalid list index.
pub fn set(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    match &args[0].kind {
        ValueKind::List(list) => {
            let index = expect_integer(&args[1], site, "Second argument must be a number")?;
            let mut elements = list.borrow_mut();
            let position = resolve_index(elements.len(), index).ok_or_else(|| {
                               site.out_of_bounds("Could not set that value to the list because the index is out \
                                                   of bounds")
                           })?;
            elements[position] = args[2].clone();
        },
        ValueKind::Dict(dict) => {
            let key = expect_string(&args[1], site, "Second argument must be a string")?;
            let mut entries = dict.borrow_mut();
            match entries.iter_mut().find(|(existing, _)| existing == key) {
                Some((_, value)) => *value = args[2].clone(),
                None => entries.push((key.to_string(), args[2].clone())),
            }
        },
        _ => return Err(site.type_error("First argument must be a list")),
    }
    Ok(site.value(Value::null()))
}

/// Removes the element at an index and returns it.
///
/// # Errors
/// `IndexOutOfBounds` for an invalid index.
pub fn pop(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let list = expect_list(&args[0], site, "First argument must be a list")?;
    let index = expect_integer(&args[1], site, "Second argument must be a number")?;

    let mut elements = list.borrow_mut();
    let position = resolve_index(elements.len(), index).ok_or_else(|| {
                       site.out_of_bounds("Element at this index could not be removed from the list because the \
                                           index is out of bounds")
                   })?;
    Ok(elements.remove(position))
}

/// Appends every element of the second list to the first, in place.
///
/// Extending a list with itself doubles it.
pub fn extend(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let target = expect_list(&args[0], site, "First argument must be a list")?;
    let source = expect_list(&args[1], site, "Second argument must be a list")?;

    let added = source.borrow().clone();
    target.borrow_mut().extend(added);
    Ok(site.value(Value::null()))
}

/// Returns a list element by index or a dictionary value by key.
///
/// # Errors
/// - `TypeError` for a container or key of the wrong kind.
/// - `IndexOutOfBounds` for an invalid list index or a missing key.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "get([1, 2, 3], -1); get({\"k\": \"v\"}, \"k\")").unwrap();
/// assert_eq!(value.to_string(), "[3, v]");
/// ```
pub fn get(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    match &args[0].kind {
        ValueKind::List(list) => {
            let index = expect_integer(&args[1], site, "Second argument must be a number")?;
            let elements = list.borrow();
            resolve_index(elements.len(), index).map(|position| elements[position].clone())
                                                .ok_or_else(|| {
                                                    site.out_of_bounds("Element at this index could not be \
                                                                        retrieved because the index is out of \
                                                                        bounds")
                                                })
        },
        ValueKind::Dict(dict) => {
            let key = expect_string(&args[1], site, "Second argument must be a string")?;
            dict.borrow()
                .iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| site.out_of_bounds("Could not get any value because that key doesn't exist"))
        },
        _ => Err(site.type_error("First argument must be a list or a dictionary")),
    }
}

/// Returns the number of elements of a list.
pub fn len(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let list = expect_list(&args[0], site, "Argument must be a list")?;
    let length = i64::try_from(list.borrow().len()).unwrap_or(i64::MAX);
    Ok(site.value(Value::int(length)))
}

/// Returns `1` if a dictionary has an entry for the key, `0` otherwise.
pub fn has_key(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let dict = expect_dict(&args[0], site, "First argument must be a dictionary")?;
    let key = expect_string(&args[1], site, "Second argument must be a string")?;

    let found = dict.borrow().iter().any(|(existing, _)| existing == key);
    Ok(site.value(Value::boolean(found)))
}

/// Returns a new list with the elements in ascending order.
///
/// Numbers sort by value and strings lexicographically; the input list is
/// left untouched.
///
/// # Errors
/// `TypeError` unless the elements are all numbers or all strings.
///
/// # Example
/// ```
/// let value = kode::run("<stdin>", "sort([3, 1.5, -2]); sort([\"b\", \"a\"])").unwrap();
/// assert_eq!(value.to_string(), "[[-2, 1.5, 3], [a, b]]");
/// assert!(kode::run("<stdin>", "sort([1, \"a\"])").is_err());
/// ```
pub fn sort(_: &mut Interpreter, args: &[Value], site: &CallSite) -> EvalResult<Value> {
    let list = expect_list(&args[0], site, "Argument must be a list")?;
    let mut elements = list.borrow().clone();

    let all_numbers = elements.iter().all(|element| element.as_number().is_some());
    let all_strings = elements.iter().all(|element| element.as_str().is_some());

    if all_numbers {
        elements.sort_by_key(|element| element.as_number().map(|number| OrderedFloat(number.as_f64())));
    } else if all_strings {
        elements.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    } else {
        return Err(site.type_error("List elements must be all numbers or all strings"));
    }

    Ok(site.value(Value::list(elements)))
}
