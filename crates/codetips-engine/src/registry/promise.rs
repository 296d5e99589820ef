use super::{DefinitionTable, Palette};

pub const PROMISE_API: DefinitionTable = DefinitionTable {
    name: "promise",
    palette: Palette::Promise,
    entries: &[
        (
            "Promise",
            "class Promise<T>",
            "Represents the eventual completion (or failure) of an asynchronous operation and its resulting value.",
        ),
        (
            "all",
            "Promise.all<T>(values: Iterable<T | PromiseLike<T>>): Promise<Awaited<T>[]>",
            "Resolves when every input resolves; rejects as soon as one rejects.",
        ),
        (
            "allSettled",
            "Promise.allSettled<T>(values: Iterable<T>): Promise<PromiseSettledResult<Awaited<T>>[]>",
            "Resolves after every input settles, reporting each outcome.",
        ),
        (
            "race",
            "Promise.race<T>(values: Iterable<T>): Promise<Awaited<T>>",
            "Settles as soon as the first input settles.",
        ),
        (
            "any",
            "Promise.any<T>(values: Iterable<T>): Promise<Awaited<T>>",
            "Resolves with the first fulfilled input; rejects with an AggregateError if all reject.",
        ),
        (
            "resolve",
            "Promise.resolve<T>(value: T): Promise<Awaited<T>>",
            "Returns a promise resolved with the given value.",
        ),
        (
            "reject",
            "Promise.reject<T = never>(reason?: any): Promise<T>",
            "Returns a promise rejected with the given reason.",
        ),
        (
            "then",
            "Promise<T>.then<R>(onFulfilled?, onRejected?): Promise<R>",
            "Attaches callbacks for the resolution and/or rejection of the promise.",
        ),
        (
            "catch",
            "Promise<T>.catch<R>(onRejected?): Promise<T | R>",
            "Attaches a callback for only the rejection of the promise.",
        ),
        (
            "finally",
            "Promise<T>.finally(onFinally?): Promise<T>",
            "Attaches a callback invoked when the promise settles, whatever the outcome.",
        ),
        (
            "PromiseLike",
            "interface PromiseLike<T>",
            "Any object with a compatible `then` method.",
        ),
        (
            "Awaited",
            "type Awaited<T>",
            "Recursively unwraps the value type of a promise.",
        ),
    ],
};
