use std::collections::HashMap;

use jfix_syntax::{parse_java, AstNode, CompilationUnit, NodeId, SourceTree, TypeDecl};

/// Simple names that resolve to `java.lang` even when no declaration is registered for them.
pub(crate) const JAVA_LANG_NAMES: &[&str] = &[
    "Boolean",
    "Byte",
    "Character",
    "CharSequence",
    "Class",
    "ClassCastException",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "Integer",
    "InterruptedException",
    "Iterable",
    "Long",
    "Math",
    "NullPointerException",
    "Number",
    "Object",
    "Override",
    "Record",
    "Runnable",
    "RuntimeException",
    "SafeVarargs",
    "Short",
    "String",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// Whether `simple_name` denotes a well-known `java.lang` type, which is in scope without an
/// import.
pub fn is_java_lang_name(simple_name: &str) -> bool {
    JAVA_LANG_NAMES.contains(&simple_name)
}

/// Declarations of a small slice of the JDK, enough for common quick-fix scenarios.
const JDK_STUBS: &[(&str, &str)] = &[
    (
        "java/lang/Object.java",
        "package java.lang;
public class Object {
    public Object() {}
    public boolean equals(Object obj) { return this == obj; }
    public native int hashCode();
    public String toString() { return getClass().getName(); }
    protected native Object clone() throws CloneNotSupportedException;
    protected void finalize() throws Throwable {}
}",
    ),
    (
        "java/lang/Runnable.java",
        "package java.lang;
@FunctionalInterface
public interface Runnable {
    void run();
}",
    ),
    (
        "java/lang/Comparable.java",
        "package java.lang;
public interface Comparable<T> {
    int compareTo(T o);
}",
    ),
    (
        "java/lang/Iterable.java",
        "package java.lang;
import java.util.Iterator;
import java.util.function.Consumer;
public interface Iterable<T> {
    Iterator<T> iterator();
    default void forEach(Consumer<? super T> action) {
        for (T t : this) { action.accept(t); }
    }
}",
    ),
    (
        "java/lang/AutoCloseable.java",
        "package java.lang;
public interface AutoCloseable {
    void close() throws Exception;
}",
    ),
    (
        "java/lang/Cloneable.java",
        "package java.lang;
public interface Cloneable {}",
    ),
    (
        "java/lang/CharSequence.java",
        "package java.lang;
public interface CharSequence {
    int length();
    char charAt(int index);
    CharSequence subSequence(int start, int end);
    public String toString();
    default boolean isEmpty() { return this.length() == 0; }
}",
    ),
    (
        "java/lang/Enum.java",
        "package java.lang;
import java.io.Serializable;
public abstract class Enum<E extends Enum<E>> implements Comparable<E>, Serializable {
    protected Enum(String name, int ordinal) {}
    public final String name() { return null; }
    public final int ordinal() { return 0; }
    public final int compareTo(E o) { return 0; }
}",
    ),
    (
        "java/lang/Record.java",
        "package java.lang;
public abstract class Record {
    protected Record() {}
    public abstract boolean equals(Object obj);
    public abstract int hashCode();
    public abstract String toString();
}",
    ),
    (
        "java/lang/Number.java",
        "package java.lang;
public abstract class Number implements java.io.Serializable {
    public abstract int intValue();
    public abstract long longValue();
    public abstract float floatValue();
    public abstract double doubleValue();
    public byte byteValue() { return (byte) intValue(); }
    public short shortValue() { return (short) intValue(); }
}",
    ),
    (
        "java/io/Serializable.java",
        "package java.io;
public interface Serializable {}",
    ),
    (
        "java/io/IOException.java",
        "package java.io;
public class IOException extends Exception {}",
    ),
    (
        "java/io/Closeable.java",
        "package java.io;
public interface Closeable extends AutoCloseable {
    void close() throws IOException;
}",
    ),
    (
        "java/util/Iterator.java",
        "package java.util;
public interface Iterator<E> {
    boolean hasNext();
    E next();
    default void remove() { throw new UnsupportedOperationException(\"remove\"); }
}",
    ),
    (
        "java/util/Comparator.java",
        "package java.util;
@FunctionalInterface
public interface Comparator<T> {
    int compare(T o1, T o2);
    boolean equals(Object obj);
    default Comparator<T> reversed() { return null; }
}",
    ),
    (
        "java/util/Map.java",
        "package java.util;
public interface Map<K, V> {
    interface Entry<K, V> {
        K getKey();
        V getValue();
        V setValue(V value);
    }
    int size();
    boolean isEmpty();
    V get(Object key);
    V put(K key, V value);
}",
    ),
    (
        "java/util/function/Function.java",
        "package java.util.function;
@FunctionalInterface
public interface Function<T, R> {
    R apply(T t);
    default <V> Function<V, R> compose(Function<? super V, ? extends T> before) { return null; }
}",
    ),
    (
        "java/util/function/BiFunction.java",
        "package java.util.function;
@FunctionalInterface
public interface BiFunction<T, U, R> {
    R apply(T t, U u);
}",
    ),
    (
        "java/util/function/Supplier.java",
        "package java.util.function;
@FunctionalInterface
public interface Supplier<T> {
    T get();
}",
    ),
    (
        "java/util/function/Consumer.java",
        "package java.util.function;
@FunctionalInterface
public interface Consumer<T> {
    void accept(T t);
}",
    ),
    (
        "java/util/function/Predicate.java",
        "package java.util.function;
@FunctionalInterface
public interface Predicate<T> {
    boolean test(T t);
}",
    ),
    (
        "java/util/concurrent/Callable.java",
        "package java.util.concurrent;
@FunctionalInterface
public interface Callable<V> {
    V call() throws Exception;
}",
    ),
];

pub(crate) struct LibraryUnit {
    pub(crate) name: String,
    pub(crate) tree: SourceTree,
}

/// Parsed library declarations, indexed by qualified name.
///
/// Types registered later shadow earlier registrations of the same qualified name.
#[derive(Default)]
pub struct TypeStore {
    units: Vec<LibraryUnit>,
    index: HashMap<String, (usize, NodeId)>,
}

impl std::fmt::Debug for TypeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeStore")
            .field("units", &self.units.len())
            .field("types", &self.index.len())
            .finish()
    }
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with declarations for common `java.lang`, `java.io` and `java.util`
    /// types.
    pub fn with_jdk_stubs() -> Self {
        let mut store = Self::new();
        for (unit, text) in JDK_STUBS {
            store.add_source(*unit, text);
        }
        store
    }

    /// Parse `text` and register every (non-local) type it declares. Returns the qualified names.
    pub fn add_source(&mut self, unit: impl Into<String>, text: &str) -> Vec<String> {
        let unit = unit.into();
        let tree = parse_java(text);
        if !tree.errors().is_empty() {
            tracing::debug!(
                target = "jfix.types",
                unit = %unit,
                errors = tree.errors().len(),
                "library unit has syntax errors (best effort)"
            );
        }

        let unit_idx = self.units.len();
        let declared = declared_types(&tree);
        let mut names = Vec::with_capacity(declared.len());
        for (name, node) in declared {
            self.index.insert(name.clone(), (unit_idx, node));
            names.push(name);
        }
        self.units.push(LibraryUnit { name: unit, tree });
        names
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.index.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub(crate) fn lookup(&self, qualified_name: &str) -> Option<(&LibraryUnit, NodeId)> {
        let &(unit, node) = self.index.get(qualified_name)?;
        Some((&self.units[unit], node))
    }
}

/// Qualified names of the top-level and member types declared in `tree`, in source order.
pub(crate) fn declared_types(tree: &SourceTree) -> Vec<(String, NodeId)> {
    fn visit(decl: TypeDecl<'_>, prefix: &str, out: &mut Vec<(String, NodeId)>) {
        let Some(name) = decl.name() else {
            return;
        };
        let qualified = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        out.push((qualified.clone(), decl.node()));
        let Some(body) = decl.body() else {
            return;
        };
        for member in body.members() {
            if let Some(nested) = TypeDecl::cast(decl.tree(), member) {
                visit(nested, &qualified, out);
            }
        }
    }

    let unit = CompilationUnit::root(tree);
    let package = unit.package_name();
    let mut out = Vec::new();
    for decl in unit.type_declarations() {
        visit(decl, &package, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jdk_stubs_parse_cleanly() {
        for (unit, text) in JDK_STUBS {
            let tree = parse_java(text);
            assert!(tree.errors().is_empty(), "{unit}: {:?}", tree.errors());
        }
    }

    #[test]
    fn indexes_member_types_by_qualified_name() {
        let store = TypeStore::with_jdk_stubs();
        assert!(store.contains("java.util.Map"));
        assert!(store.contains("java.util.Map.Entry"));
        assert!(store.contains("java.lang.Runnable"));
        assert!(!store.contains("java.lang.String"));
    }

    #[test]
    fn later_registrations_shadow_earlier_ones() {
        let mut store = TypeStore::with_jdk_stubs();
        let names = store.add_source(
            "Runnable.java",
            "package java.lang; public interface Runnable { void run(); void stop(); }",
        );
        assert_eq!(names, vec!["java.lang.Runnable".to_string()]);
        let (unit, _) = store.lookup("java.lang.Runnable").unwrap();
        assert_eq!(unit.name, "Runnable.java");
    }
}
