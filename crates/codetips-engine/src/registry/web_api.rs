use super::{DefinitionTable, Palette};

pub const WEB_API: DefinitionTable = DefinitionTable {
    name: "web-api",
    palette: Palette::WebApi,
    entries: &[
        (
            "fetch",
            "fetch(input: RequestInfo | URL, init?: RequestInit): Promise<Response>",
            "Starts fetching a resource from the network.",
        ),
        ("Response", "interface Response", "The response to a `fetch` request."),
        ("Request", "interface Request", "A resource request for `fetch`."),
        ("Headers", "interface Headers", "HTTP request and response headers."),
        (
            "AbortController",
            "class AbortController",
            "Creates a signal that aborts one or more web requests.",
        ),
        (
            "AbortSignal",
            "interface AbortSignal",
            "Communicates with a request and aborts it when needed.",
        ),
        ("URL", "class URL", "Parses, constructs and normalizes URLs."),
        (
            "URLSearchParams",
            "class URLSearchParams",
            "Utility methods for working with a URL query string.",
        ),
        ("window", "var window: Window", "The global object in a browser context."),
        (
            "document",
            "var document: Document",
            "The loaded web page and entry point to the DOM tree.",
        ),
        (
            "localStorage",
            "var localStorage: Storage",
            "Key/value storage persisted across browser sessions.",
        ),
        (
            "sessionStorage",
            "var sessionStorage: Storage",
            "Key/value storage for the current tab session.",
        ),
        (
            "addEventListener",
            "addEventListener(type: string, listener: EventListener, options?): void",
            "Registers an event handler on the target.",
        ),
        (
            "removeEventListener",
            "removeEventListener(type: string, listener: EventListener, options?): void",
            "Removes a handler registered with `addEventListener`.",
        ),
        (
            "querySelector",
            "querySelector<E extends Element>(selectors: string): E | null",
            "Returns the first element matching the selector.",
        ),
        (
            "requestAnimationFrame",
            "requestAnimationFrame(callback: FrameRequestCallback): number",
            "Runs a callback before the next repaint.",
        ),
        (
            "IntersectionObserver",
            "class IntersectionObserver",
            "Observes visibility changes of an element relative to a root.",
        ),
        (
            "ResizeObserver",
            "class ResizeObserver",
            "Reports changes to the dimensions of an element.",
        ),
        ("MutationObserver", "class MutationObserver", "Watches for changes made to the DOM tree."),
        ("CustomEvent", "class CustomEvent<T>", "An event carrying application-defined data."),
        ("WebSocket", "class WebSocket", "A persistent, two-way connection to a server."),
        ("Worker", "class Worker", "Runs a script in a background thread."),
        ("navigator", "var navigator: Navigator", "The state and identity of the user agent."),
    ],
};
